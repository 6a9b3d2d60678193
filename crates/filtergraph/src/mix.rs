//! Stereo downmix of merged audio streams.
//!
//! `amerge` concatenates every input's channels in item order, so the
//! channels of the `k`-th item start after the channels of all items
//! before it. The mix maps those channels onto left and right.

use std::fmt;

use tessera_media_model::media::{ChannelLayout, MediaItem};

/// Front-left / front-right share of a 5.1 item.
const SURROUND_FRONT_WEIGHT: f64 = 0.4;
/// Center channel share of a 5.1 item, fed to both sides.
const SURROUND_CENTER_WEIGHT: f64 = 0.6;

/// One input channel contributing to an output side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// `None` means unweighted.
    pub weight: Option<f64>,
    /// Index into the merged channel list.
    pub channel: usize,
}

impl Term {
    fn plain(channel: usize) -> Self {
        Self {
            weight: None,
            channel,
        }
    }

    fn weighted(weight: f64, channel: usize) -> Self {
        Self {
            weight: Some(weight),
            channel,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(weight) => write!(f, "{weight}*c{}", self.channel),
            None => write!(f, "c{}", self.channel),
        }
    }
}

/// Left and right output channels as sums of merged input channels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoDownmix {
    pub left: Vec<Term>,
    pub right: Vec<Term>,
    /// Total merged channels consumed.
    pub channels: usize,
}

impl StereoDownmix {
    /// Build the mix for `items`, in merge order.
    pub fn for_items<'a>(items: impl IntoIterator<Item = &'a MediaItem>) -> Self {
        let mut mix = Self::default();
        for item in items {
            mix.push(item.channels);
        }
        mix
    }

    fn push(&mut self, layout: ChannelLayout) {
        let base = self.channels;
        match layout {
            ChannelLayout::Stereo => {
                self.left.push(Term::plain(base));
                self.right.push(Term::plain(base + 1));
            }
            ChannelLayout::Surround51 => {
                let center = base + 2;
                self.left.push(Term::weighted(SURROUND_FRONT_WEIGHT, base));
                self.left.push(Term::weighted(SURROUND_CENTER_WEIGHT, center));
                self.right.push(Term::weighted(SURROUND_FRONT_WEIGHT, base + 1));
                self.right.push(Term::weighted(SURROUND_CENTER_WEIGHT, center));
            }
        }
        self.channels += layout.count();
    }

    pub fn is_empty(&self) -> bool {
        self.channels == 0
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_str("+")?;
        }
        write!(f, "{term}")?;
    }
    Ok(())
}

impl fmt::Display for StereoDownmix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stereo|c0<")?;
        write_side(f, &self.left)?;
        f.write_str("|c1<")?;
        write_side(f, &self.right)
    }
}

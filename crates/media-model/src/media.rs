//! Media items recorded during a session.
//!
//! A media item is one input file: a participant's camera, a microphone
//! track, or a still background card. Its id doubles as the input index
//! handed to the rendering engine, so `[3:v]` addresses the video stream
//! of the item with id 3.

use serde::{Deserialize, Serialize};

/// Identity of a media item and its engine input index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u32);

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MediaId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The participant who owns a media item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    /// Stable participant identifier.
    pub id: String,
    /// Display name burned into the video.
    pub name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Channel layout of an audio stream.
///
/// Mono sources must be upmixed to stereo before they are listed, so
/// only two layouts reach the planner. A declared count of 1 is rejected:
/// the downmix would address channels the stream does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ChannelLayout {
    #[default]
    Stereo,
    /// 5.1: FL, FR, FC, LFE, BL, BR.
    Surround51,
}

impl ChannelLayout {
    /// Number of interleaved channels.
    pub fn count(self) -> usize {
        match self {
            ChannelLayout::Stereo => 2,
            ChannelLayout::Surround51 => 6,
        }
    }
}

impl TryFrom<u32> for ChannelLayout {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ChannelLayout::Stereo),
            6 => Ok(ChannelLayout::Surround51),
            other => Err(format!(
                "unsupported audio channel count {other} (expected 2 or 6)"
            )),
        }
    }
}

impl From<ChannelLayout> for u32 {
    fn from(value: ChannelLayout) -> Self {
        value.count() as u32
    }
}

/// One input of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,

    /// Carries a video stream.
    #[serde(default)]
    pub has_video: bool,

    /// Carries an audio stream.
    #[serde(default)]
    pub has_audio: bool,

    /// A still card standing in for a participant.
    #[serde(default)]
    pub is_background: bool,

    /// Owning participant, when known.
    #[serde(default)]
    pub user: Option<UserRef>,

    /// Absolute start time (ms).
    pub start_ms: i64,

    /// Duration (ms).
    pub duration_ms: i64,

    /// Layout of the audio stream; ignored without audio.
    #[serde(default, rename = "audio_channels")]
    pub channels: ChannelLayout,
}

impl MediaItem {
    /// Camera recording with sound.
    pub fn camera(id: u32, user: Option<UserRef>, start_ms: i64, duration_ms: i64) -> Self {
        Self {
            id: MediaId(id),
            has_video: true,
            has_audio: true,
            is_background: false,
            user,
            start_ms,
            duration_ms,
            channels: ChannelLayout::Stereo,
        }
    }

    /// Audio-only recording.
    pub fn audio(id: u32, user: Option<UserRef>, start_ms: i64, duration_ms: i64) -> Self {
        Self {
            has_video: false,
            ..Self::camera(id, user, start_ms, duration_ms)
        }
    }

    /// Still background card.
    pub fn background(id: u32, user: Option<UserRef>, start_ms: i64, duration_ms: i64) -> Self {
        Self {
            has_video: false,
            has_audio: false,
            is_background: true,
            ..Self::camera(id, user, start_ms, duration_ms)
        }
    }

    /// Same item with a different audio layout.
    pub fn with_channels(mut self, channels: ChannelLayout) -> Self {
        self.channels = channels;
        self
    }

    /// Same item with its audio stream dropped.
    pub fn muted(mut self) -> Self {
        self.has_audio = false;
        self
    }

    /// Absolute end time (ms).
    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.duration_ms
    }

    /// Whether this item plays at any point inside `[start_ms, end_ms)`.
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms < end_ms && start_ms < self.end_ms()
    }

    /// Whether the item is rendered as a tile on its own (video or card).
    pub fn is_visual(&self) -> bool {
        self.has_video || self.is_background
    }

    /// Whether both items have a known owner and it is the same one.
    pub fn same_user(&self, other: &MediaItem) -> bool {
        match (&self.user, &other.user) {
            (Some(a), Some(b)) => a.id == b.id,
            _ => false,
        }
    }

    /// The owner's display name, if an owner is known.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

//! Engine filter definitions.
//!
//! Every filter the planner emits is built here, so parameter spelling
//! and order live in one place.

use tessera_common::config::GraphStyle;
use tessera_common::timing::format_secs;
use tessera_media_model::geometry::{LayoutBox, Size};

use crate::expr;
use crate::graph::{Filter, Value};
use crate::mix::StereoDownmix;

/// Solid color source covering `size`. Without a color the engine
/// default (black) is used.
pub fn color(size: Size, fill: Option<&str>) -> Filter {
    let filter = Filter::new("color").named("s", Value::text(size));
    match fill {
        Some(fill) => filter.named("c", Value::text(fill)),
        None => filter,
    }
}

/// Keep `[start_ms, end_ms)` of a video stream.
pub fn trim(start_ms: i64, end_ms: i64) -> Filter {
    Filter::new("trim")
        .positional(Value::Text(format_secs(start_ms)))
        .positional(Value::Text(format_secs(end_ms)))
}

/// Restart video timestamps at zero.
pub fn setpts_start() -> Filter {
    Filter::new("setpts").positional(Value::text("PTS-STARTPTS"))
}

/// Keep `[start_ms, end_ms)` of an audio stream.
pub fn atrim(start_ms: i64, end_ms: i64) -> Filter {
    Filter::new("atrim")
        .positional(Value::Text(format_secs(start_ms)))
        .positional(Value::Text(format_secs(end_ms)))
}

/// Restart audio timestamps at zero.
pub fn asetpts_start() -> Filter {
    Filter::new("asetpts").positional(Value::text("PTS-STARTPTS"))
}

/// Large name centered on a placeholder card.
pub fn centered_name(name: &str, style: &GraphStyle) -> Filter {
    Filter::new("drawtext")
        .named("text", Value::Quoted(escape_text(name)))
        .named("x", Value::Expr(expr::text_center_x()))
        .named("y", Value::Expr(expr::text_center_y()))
        .named("fontcolor", Value::text(&style.card_font_color))
        .named("fontsize", Value::text(style.card_font_size))
}

/// Boxed name label in the bottom-left corner of a tile.
pub fn name_label(name: &str, style: &GraphStyle) -> Filter {
    Filter::new("drawtext")
        .named("text", Value::Quoted(escape_text(name)))
        .named("x", Value::text(style.label_margin))
        .named("y", Value::Expr(expr::text_bottom_y(style.label_margin)))
        .named("fontcolor", Value::text(&style.label_font_color))
        .named("fontsize", Value::text(style.label_font_size))
        .named("box", Value::text(1))
        .named("boxcolor", Value::text(&style.label_box_color))
        .named("line_spacing", Value::text(style.label_line_spacing))
}

/// Fit the input inside `target` keeping its aspect ratio.
///
/// The tighter axis is chosen by the engine at init time, since the
/// input resolution is unknown while planning.
pub fn scale_fit(target: &LayoutBox) -> Filter {
    Filter::new("scale")
        .named("w", Value::QuotedExpr(expr::fit_width(target.w, target.h)))
        .named("h", Value::QuotedExpr(expr::fit_height(target.w, target.h)))
        .named("eval", Value::text("init"))
}

/// Overlay the second input centered inside `target`.
pub fn overlay_centered(target: &LayoutBox, shortest: bool) -> Filter {
    let filter = Filter::new("overlay")
        .named("x", Value::QuotedExpr(expr::centered_in(target.w, "w", target.x)))
        .named("y", Value::QuotedExpr(expr::centered_in(target.h, "h", target.y)))
        .named("eval", Value::text("init"));
    if shortest {
        filter.named("shortest", Value::text(1))
    } else {
        filter
    }
}

/// Interleave `inputs` audio streams into one multi-channel stream.
pub fn amerge(inputs: usize) -> Filter {
    Filter::new("amerge").named("inputs", Value::text(inputs))
}

/// Remix merged channels down to stereo.
pub fn pan(mix: &StereoDownmix) -> Filter {
    Filter::new("pan").positional(Value::Quoted(mix.to_string()))
}

/// Silent stereo source.
pub fn anullsrc(sample_rate: u32) -> Filter {
    Filter::new("anullsrc")
        .named("r", Value::text(sample_rate))
        .named("cl", Value::text("stereo"))
}

/// Join `segments` consecutive video+audio pairs.
pub fn concat(segments: usize) -> Filter {
    Filter::new("concat")
        .named("n", Value::text(segments))
        .named("v", Value::text(1))
        .named("a", Value::text(1))
}

/// Escape a display name for a quoted `drawtext` text value.
///
/// Straight quotes would close the quoted value, so they become a
/// typographic apostrophe. Colons, backslashes and percent signs are
/// escaped for the option parser and drawtext's own expansion.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\'' => escaped.push('\u{2019}'),
            '\\' => escaped.push_str("\\\\\\\\"),
            ':' => escaped.push_str("\\:"),
            '%' => escaped.push_str("\\\\\\%"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert_eq!(color(Size::new(1280, 720), None).to_string(), "color=s=1280x720");
        assert_eq!(
            color(Size::new(640, 360), Some("green@1.0")).to_string(),
            "color=s=640x360:c=green@1.0"
        );
    }

    #[test]
    fn test_trim_uses_seconds() {
        assert_eq!(trim(2_000, 7_500).to_string(), "trim=2:7.5");
        assert_eq!(atrim(0, 250).to_string(), "atrim=0:0.25");
    }

    #[test]
    fn test_scale_fit() {
        let target = LayoutBox::new(640, 0, 640, 360);
        assert_eq!(
            scale_fit(&target).to_string(),
            "scale=w='if(gt(iw/ih,640/(360)),640,-2)':h='if(gt(iw/ih,640/(360)),-2,360)':eval=init"
        );
    }

    #[test]
    fn test_overlay_shortest_flag() {
        let target = LayoutBox::new(640, 360, 640, 360);
        assert_eq!(
            overlay_centered(&target, true).to_string(),
            "overlay=x='(640-w)/2+640':y='(360-h)/2+360':eval=init:shortest=1"
        );
        assert!(!overlay_centered(&target, false).to_string().contains("shortest"));
    }

    #[test]
    fn test_drawtext_defaults() {
        let style = GraphStyle::default();
        assert_eq!(
            centered_name("Alice", &style).to_string(),
            "drawtext=text='Alice':x=(w-tw)/2:y=((h-th)/2):fontcolor=black:fontsize=55"
        );
        assert_eq!(
            name_label("Alice", &style).to_string(),
            "drawtext=text='Alice':x=5:y=h-th-5:fontcolor=white:fontsize=20:box=1:boxcolor=black:line_spacing=3"
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Ana María"), "Ana María");
        assert_eq!(escape_text("O'Neil"), "O\u{2019}Neil");
        assert_eq!(escape_text("a:b"), "a\\:b");
    }

    #[test]
    fn test_audio_sources() {
        assert_eq!(anullsrc(48_000).to_string(), "anullsrc=r=48000:cl=stereo");
        assert_eq!(amerge(3).to_string(), "amerge=inputs=3");
        assert_eq!(concat(2).to_string(), "concat=n=2:v=1:a=1");
    }
}

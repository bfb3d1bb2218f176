use std::borrow::Cow;
use std::fmt::Write;

use crate::layout::Layout;

// The control sequences a render interleaves with its text: SGR bold,
// SGR 256-color foreground, SGR reset, erase-to-end-of-line (run after the
// visible text on every render, so a previously longer line leaves no tail)
// and erase-full-line (used by `println` to displace the gauge line).
const SGR_BOLD: &str = "\x1b[1m";
const SGR_RESET: &str = "\x1b[0m";
const ERASE_TO_EOL: &str = "\x1b[K";
const ERASE_LINE: &str = "\x1b[2K";

/// Controls the rendering of a [`Gauge`] line.
///
/// A style is long-lived configuration: the line width cap, the two bar
/// glyphs, the bar's SGR sequence group and the newline policy. All setters
/// are builder-like and consume the style; a gauge picks the style up on its
/// next render.
///
/// [`Gauge`]: crate::Gauge
#[derive(Clone, Debug)]
pub struct GaugeStyle {
    pub(crate) width_limit: usize,
    pub(crate) fill_char: char,
    pub(crate) empty_char: char,
    pub(crate) bold_seq: Cow<'static, str>,
    pub(crate) fill_seq: Cow<'static, str>,
    pub(crate) empty_seq: Cow<'static, str>,
    pub(crate) reset_seq: Cow<'static, str>,
    pub(crate) force_newline: bool,
    // how many display columns each bar glyph occupies
    pub(crate) char_width: usize,
}

#[cfg(feature = "unicode-width")]
fn glyph_width(c: char) -> usize {
    use unicode_width::UnicodeWidthChar;
    c.width().unwrap_or(1).max(1)
}

#[cfg(not(feature = "unicode-width"))]
fn glyph_width(_c: char) -> usize {
    1
}

impl Default for GaugeStyle {
    /// The default gauge style: full-block/light-shade glyphs, no styling,
    /// no width limit, in-place redraw.
    fn default() -> GaugeStyle {
        GaugeStyle {
            width_limit: usize::MAX,
            fill_char: '█',
            empty_char: '░',
            bold_seq: Cow::Borrowed(""),
            fill_seq: Cow::Borrowed(""),
            empty_seq: Cow::Borrowed(""),
            reset_seq: Cow::Borrowed(""),
            force_newline: false,
            char_width: 1,
        }
    }
}

impl GaugeStyle {
    /// Caps the rendered line length independently of the terminal width.
    pub fn width_limit(mut self, limit: usize) -> GaugeStyle {
        self.width_limit = limit;
        self
    }

    /// Sets the glyph for the completed bar segment.
    pub fn fill_char(mut self, c: char) -> GaugeStyle {
        self.set_fill_char(c);
        self
    }

    /// Sets the glyph for the remaining bar segment.
    pub fn empty_char(mut self, c: char) -> GaugeStyle {
        self.set_empty_char(c);
        self
    }

    /// Sets the bar styling as one unit: a bold flag plus 256-color indices
    /// for the filled and empty segments. The four underlying sequences
    /// (bold, fill color, empty color, reset) are never partially applied.
    pub fn bar_style(mut self, bold: bool, fill_color: u8, empty_color: u8) -> GaugeStyle {
        self.set_bar_style(bold, fill_color, empty_color);
        self
    }

    /// If true, each render ends with a line break instead of a carriage
    /// return, turning the gauge into append-only logging output.
    pub fn force_newline(mut self, force: bool) -> GaugeStyle {
        self.force_newline = force;
        self
    }

    pub(crate) fn set_fill_char(&mut self, c: char) {
        self.fill_char = c;
        self.char_width = glyph_width(self.fill_char).max(glyph_width(self.empty_char));
    }

    pub(crate) fn set_empty_char(&mut self, c: char) {
        self.empty_char = c;
        self.char_width = glyph_width(self.fill_char).max(glyph_width(self.empty_char));
    }

    pub(crate) fn set_bar_style(&mut self, bold: bool, fill_color: u8, empty_color: u8) {
        self.bold_seq = if bold {
            Cow::Borrowed(SGR_BOLD)
        } else {
            Cow::Borrowed("")
        };
        self.fill_seq = Cow::Owned(format!("\x1b[38;5;{fill_color}m"));
        self.empty_seq = Cow::Owned(format!("\x1b[38;5;{empty_color}m"));
        self.reset_seq = Cow::Borrowed(SGR_RESET);
    }

    /// Serializes a layout decision into the literal line written to the
    /// terminal: cursor return, prefix, styled bar, counter, percentage,
    /// annotation phrase, erase-to-end-of-line, then a carriage return
    /// (in-place mode) or a line break (forced-newline mode).
    pub(crate) fn format_line(&self, layout: &Layout) -> String {
        let mut line = String::from("\r");
        if let Some(prefix) = layout.prefix.as_deref() {
            line.push_str(prefix);
        }
        match layout.bar {
            Some((filled, empty)) => {
                line.push_str(" |");
                line.push_str(&self.bold_seq);
                line.push_str(&self.fill_seq);
                for _ in 0..filled {
                    line.push(self.fill_char);
                }
                line.push_str(&self.empty_seq);
                for _ in 0..empty {
                    line.push(self.empty_char);
                }
                line.push_str(&self.reset_seq);
                line.push_str("| ");
            }
            None if layout.prefix.is_some() => line.push(' '),
            None => {}
        }
        if layout.max > 0 {
            let _ = write!(line, "{}/{} ", layout.val, layout.max);
        }
        let _ = write!(line, "{:.2}%", layout.done * 100.0);
        if let Some(phrase) = layout.annotation_phrase() {
            line.push_str(" | ");
            line.push_str(&phrase);
        }
        line.push_str(ERASE_TO_EOL);
        line.push(if self.force_newline { '\n' } else { '\r' });
        line
    }

    /// A standalone log line. The full-line erase displaces the gauge from
    /// the cursor row and the trailing line break keeps the next render from
    /// overwriting the message.
    pub(crate) fn format_println(&self, msg: &str) -> String {
        format!("\r{ERASE_LINE}{msg}\n")
    }
}

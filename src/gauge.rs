use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::draw_target::GaugeDrawTarget;
use crate::state::{GaugeState, RenderRequest};
use crate::style::GaugeStyle;

/// A single-line, in-place-updating progress gauge.
///
/// The gauge is an [`Arc`] around its internal state. When the gauge is
/// cloned it just increments the refcount (so the original and its clone
/// drive the same line).
///
/// Each call to [`Gauge::render`] re-queries the terminal width, decides
/// which of the optional elements still fit, and repaints the line in place.
/// On terminals too narrow for everything, elements are dropped in a fixed
/// priority order (total annotation, elapsed annotation, prefix, counter)
/// until the line fits; the percentage always survives. An annotation that
/// is ever omitted from a render stays disabled for the lifetime of the
/// gauge.
#[derive(Clone)]
pub struct Gauge {
    state: Arc<Mutex<GaugeState>>,
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge").finish()
    }
}

impl Gauge {
    /// Creates a gauge that draws to buffered stdout.
    pub fn new() -> Gauge {
        Gauge::with_draw_target(GaugeDrawTarget::stdout())
    }

    /// Creates a gauge that draws to buffered stderr.
    pub fn stderr() -> Gauge {
        Gauge::with_draw_target(GaugeDrawTarget::stderr())
    }

    /// Creates a completely hidden gauge.
    ///
    /// The gauge still latches annotations but does not render in any way.
    pub fn hidden() -> Gauge {
        Gauge::with_draw_target(GaugeDrawTarget::hidden())
    }

    /// Creates a gauge with a given draw target.
    pub fn with_draw_target(draw_target: GaugeDrawTarget) -> Gauge {
        Gauge {
            state: Arc::new(Mutex::new(GaugeState::new(draw_target))),
        }
    }

    /// A convenience builder-like function for a gauge with a given style.
    pub fn with_style(self, style: GaugeStyle) -> Gauge {
        self.state().style = style;
        self
    }

    /// Overrides the stored style. Takes effect on the next render.
    pub fn set_style(&self, style: GaugeStyle) {
        self.state().style = style;
    }

    /// Caps the rendered line length independently of the terminal width.
    pub fn set_width_limit(&self, limit: usize) {
        self.state().style.width_limit = limit;
    }

    /// Sets the glyph for the completed bar segment.
    pub fn set_fill_char(&self, c: char) {
        self.state().style.set_fill_char(c);
    }

    /// Sets the glyph for the remaining bar segment.
    pub fn set_empty_char(&self, c: char) {
        self.state().style.set_empty_char(c);
    }

    /// Sets the bar styling as one unit: a bold flag plus 256-color indices
    /// for the filled and empty segments. The underlying control sequences
    /// are replaced as a group, never partially.
    pub fn set_bar_style(&self, bold: bool, fill_color: u8, empty_color: u8) {
        self.state().style.set_bar_style(bold, fill_color, empty_color);
    }

    /// If true, each render ends with a line break instead of a carriage
    /// return, turning the gauge into append-only logging output.
    pub fn set_force_newline(&self, force: bool) {
        self.state().style.force_newline = force;
    }

    /// Sets a different draw target for the gauge.
    pub fn set_draw_target(&self, target: GaugeDrawTarget) {
        self.state().draw_target = target;
    }

    /// A quick convenience check if the gauge is hidden.
    pub fn is_hidden(&self) -> bool {
        self.state().draw_target.is_hidden()
    }

    /// Repaints the gauge line for one progress update.
    ///
    /// The line is composed in memory and written with a single write +
    /// flush, so interleaved writers on the same stream never see a partial
    /// line. I/O failures on the underlying stream propagate to the caller.
    pub fn render(&self, req: RenderRequest) -> io::Result<()> {
        self.state().render(req)
    }

    /// Prints a standalone log line that the next render will not overwrite.
    ///
    /// The gauge line currently occupying the cursor row is erased first;
    /// the next [`Gauge::render`] call repaints it below the message.
    pub fn println(&self, msg: impl AsRef<str>) -> io::Result<()> {
        self.state().println(msg.as_ref())
    }

    /// Convenience for a plain counter update: renders `val` of `max` with
    /// the completion fraction derived from the two.
    pub fn update(&self, max: u64, val: u64) -> io::Result<()> {
        let done = match max {
            0 => 0.0,
            max => val as f64 / max as f64,
        };
        self.render(RenderRequest::new(max, val, done))
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, GaugeState> {
        self.state.lock().unwrap()
    }
}

impl Default for Gauge {
    fn default() -> Gauge {
        Gauge::new()
    }
}

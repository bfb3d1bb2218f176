use std::borrow::Cow;
use std::io;

use crate::draw_target::GaugeDrawTarget;
use crate::layout::Layout;
use crate::style::GaugeStyle;

/// One progress update to render. Ephemeral: built, passed to
/// [`Gauge::render`], and discarded.
///
/// The three annotation fields carry elapsed/remaining/total semantics by
/// convention, but the gauge treats them as opaque text.
///
/// [`Gauge::render`]: crate::Gauge::render
#[derive(Clone, Debug, Default)]
pub struct RenderRequest {
    /// Total number of steps; `0` means no discrete counter, percentage only.
    pub max: u64,
    /// Current step count.
    pub val: u64,
    /// Completion fraction. Callers must supply values in `[0.0, 1.0]`; the
    /// gauge does not clamp.
    pub done: f64,
    /// Optional label rendered ahead of the bar.
    pub prefix: Option<Cow<'static, str>>,
    /// Elapsed-time annotation.
    pub prev: Option<Cow<'static, str>>,
    /// Remaining-time annotation.
    pub next: Option<Cow<'static, str>>,
    /// Total-time annotation.
    pub full: Option<Cow<'static, str>>,
}

impl RenderRequest {
    pub fn new(max: u64, val: u64, done: f64) -> RenderRequest {
        RenderRequest {
            max,
            val,
            done,
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> RenderRequest {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_prev(mut self, prev: impl Into<Cow<'static, str>>) -> RenderRequest {
        self.prev = Some(prev.into());
        self
    }

    pub fn with_next(mut self, next: impl Into<Cow<'static, str>>) -> RenderRequest {
        self.next = Some(next.into());
        self
    }

    pub fn with_full(mut self, full: impl Into<Cow<'static, str>>) -> RenderRequest {
        self.full = Some(full.into());
        self
    }
}

/// Sticky enablement flags for the annotation triad.
///
/// Every render ANDs each flag with "the value was supplied this call", so a
/// single absent value disables that annotation for the lifetime of the
/// gauge, even if later calls supply it again. Flags only ever go
/// true→false.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AnnotationLatch {
    prev: bool,
    next: bool,
    full: bool,
}

impl AnnotationLatch {
    pub(crate) fn new() -> AnnotationLatch {
        AnnotationLatch {
            prev: true,
            next: true,
            full: true,
        }
    }

    /// Folds this call's annotation presence into the flags, then strips any
    /// field whose flag is now off. Runs exactly once per render, before any
    /// width computation.
    pub(crate) fn apply(&mut self, req: &mut RenderRequest) {
        self.prev &= req.prev.is_some();
        self.next &= req.next.is_some();
        self.full &= req.full.is_some();
        if !self.prev {
            req.prev = None;
        }
        if !self.next {
            req.next = None;
        }
        if !self.full {
            req.full = None;
        }
    }
}

/// Durable state behind a gauge handle: the style, the annotation latch and
/// the draw target. Everything else lives for a single call.
#[derive(Debug)]
pub(crate) struct GaugeState {
    pub(crate) style: GaugeStyle,
    pub(crate) latch: AnnotationLatch,
    pub(crate) draw_target: GaugeDrawTarget,
}

impl GaugeState {
    pub(crate) fn new(draw_target: GaugeDrawTarget) -> GaugeState {
        GaugeState {
            style: GaugeStyle::default(),
            latch: AnnotationLatch::new(),
            draw_target,
        }
    }

    /// One render: latch the annotations, lay the line out against the live
    /// terminal width, compose it in memory, then write + flush once.
    ///
    /// The latch evolves even when the target is hidden, so un-hiding a
    /// gauge later does not resurrect annotations that were already dropped.
    pub(crate) fn render(&mut self, mut req: RenderRequest) -> io::Result<()> {
        self.latch.apply(&mut req);
        if self.draw_target.is_hidden() {
            return Ok(());
        }
        let width = self.draw_target.width() as usize;
        let layout = Layout::compute(&req, &self.style, width);
        let line = self.style.format_line(&layout);
        self.draw_target.write_flushed(&line)
    }

    /// Emits a standalone log line that the next render will not overwrite.
    pub(crate) fn println(&mut self, msg: &str) -> io::Result<()> {
        if self.draw_target.is_hidden() {
            return Ok(());
        }
        let line = self.style.format_println(msg);
        self.draw_target.write_flushed(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_strips_nothing_while_values_are_supplied() {
        let mut latch = AnnotationLatch::new();
        let mut req = RenderRequest::new(0, 0, 0.0)
            .with_prev("1m")
            .with_next("2m")
            .with_full("3m");
        latch.apply(&mut req);
        assert_eq!(req.prev.as_deref(), Some("1m"));
        assert_eq!(req.next.as_deref(), Some("2m"));
        assert_eq!(req.full.as_deref(), Some("3m"));
    }

    #[test]
    fn latch_is_monotonic() {
        let mut latch = AnnotationLatch::new();

        let mut first = RenderRequest::new(0, 0, 0.0).with_prev("1m").with_full("3m");
        latch.apply(&mut first);
        assert_eq!(first.next, None);

        // `next` was absent once; supplying it later has no effect.
        let mut second = RenderRequest::new(0, 0, 0.0)
            .with_prev("1m")
            .with_next("2m")
            .with_full("3m");
        latch.apply(&mut second);
        assert_eq!(second.prev.as_deref(), Some("1m"));
        assert_eq!(second.next, None);
        assert_eq!(second.full.as_deref(), Some("3m"));

        // Dropping `prev` as well leaves only `full` alive.
        let mut third = RenderRequest::new(0, 0, 0.0).with_full("4m");
        latch.apply(&mut third);
        assert_eq!(third.prev, None);
        assert_eq!(third.full.as_deref(), Some("4m"));

        let mut fourth = RenderRequest::new(0, 0, 0.0).with_prev("9m").with_full("5m");
        latch.apply(&mut fourth);
        assert_eq!(fourth.prev, None);
        assert_eq!(fourth.full.as_deref(), Some("5m"));
    }

    #[test]
    fn hidden_render_still_latches() {
        let mut state = GaugeState::new(GaugeDrawTarget::hidden());
        state.render(RenderRequest::new(0, 0, 0.0)).unwrap();

        let mut req = RenderRequest::new(0, 0, 0.0)
            .with_prev("1m")
            .with_next("2m")
            .with_full("3m");
        state.latch.apply(&mut req);
        assert_eq!(req.prev, None);
        assert_eq!(req.next, None);
        assert_eq!(req.full, None);
    }
}

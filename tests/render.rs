#![cfg(feature = "in_memory")]

use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use termgauge::{Gauge, GaugeDrawTarget, GaugeStyle, InMemoryTerm, RenderRequest, TermLike};

fn gauge_on(term: &InMemoryTerm) -> Gauge {
    Gauge::with_draw_target(GaugeDrawTarget::term_like(Box::new(term.clone())))
}

#[test]
fn build_scenario() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem).with_style(GaugeStyle::default().width_limit(40));

    gauge
        .render(RenderRequest::new(100, 42, 0.42).with_prefix("Build"))
        .unwrap();

    // 40 columns minus prefix (7), counter (7) and percentage (7) leaves a
    // bar budget of 19: 15 glyph columns after decoration.
    assert_eq!(in_mem.contents(), "Build |██████░░░░░░░░░| 42/100 42.00%");
}

#[test]
fn percentage_only() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem);

    gauge.render(RenderRequest::new(0, 0, 0.5)).unwrap();

    let expected = format!(" |{}{}| 50.00%", "█".repeat(34), "░".repeat(35));
    assert_eq!(in_mem.contents(), expected);
}

#[test]
fn annotation_template_and_latch() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem);

    // prev and full present, next absent: index 5, "{prev} / {full}". The
    // annotation text and separators are paid out of the bar budget, so the
    // line lands exactly on the 80th column without wrapping.
    gauge
        .render(RenderRequest::new(0, 0, 1.0).with_prev("1m").with_full("3m"))
        .unwrap();
    assert_eq!(
        in_mem.contents(),
        format!(" |{}| 100.00% | 1m / 3m", "█".repeat(59))
    );

    // full omitted once: latched off.
    gauge
        .render(RenderRequest::new(0, 0, 1.0).with_prev("2m"))
        .unwrap();
    assert_eq!(
        in_mem.contents(),
        format!(" |{}| 100.00% | 2m", "█".repeat(64))
    );

    // Supplying next and full again has no effect; both latches are off.
    gauge
        .render(
            RenderRequest::new(0, 0, 1.0)
                .with_prev("2m")
                .with_next("1m")
                .with_full("3m"),
        )
        .unwrap();
    assert_eq!(
        in_mem.contents(),
        format!(" |{}| 100.00% | 2m", "█".repeat(64))
    );
}

fn narrow_render(limit: usize) -> String {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem).with_style(GaugeStyle::default().width_limit(limit));
    gauge
        .render(
            RenderRequest::new(100, 50, 0.5)
                .with_prefix("sync")
                .with_prev("9s")
                .with_next("8s")
                .with_full("17s"),
        )
        .unwrap();
    in_mem.contents()
}

#[test]
fn degradation_ladder() {
    // Everything fits, bar included.
    assert_eq!(
        narrow_render(45),
        "sync |██░░░| 50/100 50.00% | 9s + 8s = 17s"
    );
    // Budget of 8 or less: the bar goes first, silently.
    assert_eq!(narrow_render(36), "sync 50/100 50.00% | 9s + 8s = 17s");
    // Then full is dropped,
    assert_eq!(narrow_render(35), "sync 50/100 50.00% | 9s + 8s");
    // then prev,
    assert_eq!(narrow_render(29), "sync 50/100 50.00% | 8s");
    // then the prefix,
    assert_eq!(narrow_render(24), "50/100 50.00% | 8s");
    // then the counter.
    assert_eq!(narrow_render(18), "50.00% | 8s");
    // Terminal case: the minimal line renders even when it overruns.
    assert_eq!(narrow_render(5), "50.00% | 8s");
}

#[test]
fn rendered_lines_never_exceed_the_available_width() {
    let request = || {
        RenderRequest::new(100, 42, 0.42)
            .with_prefix("Build")
            .with_prev("1m12s")
            .with_next("2m48s")
            .with_full("4m")
    };
    // 14 columns is the floor here: below it even the undroppable
    // percentage-plus-next minimum overruns, by design.
    for width in 14..=80u16 {
        let in_mem = InMemoryTerm::new(5, width);
        let gauge = gauge_on(&in_mem);
        gauge.render(request()).unwrap();
        let contents = in_mem.contents();
        assert!(
            !contents.contains('\n'),
            "line wrapped at width {width}: {contents:?}"
        );
        assert!(
            console::measure_text_width(&contents) <= width as usize,
            "line overran width {width}: {contents:?}"
        );
    }
}

#[test]
fn shrinking_render_leaves_no_artifacts() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem).with_style(GaugeStyle::default().width_limit(60));

    gauge.render(RenderRequest::new(0, 0, 0.5)).unwrap();
    assert_eq!(
        in_mem.contents(),
        format!(" |{}{}| 50.00%", "█".repeat(24), "░".repeat(25))
    );

    gauge.set_width_limit(20);
    gauge.render(RenderRequest::new(0, 0, 0.5)).unwrap();
    assert_eq!(in_mem.contents(), " |████░░░░░| 50.00%");
}

#[test]
fn println_is_not_overwritten_by_the_next_render() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem);

    gauge.render(RenderRequest::new(10, 2, 0.2)).unwrap();
    gauge.println("compiled core").unwrap();
    gauge.render(RenderRequest::new(10, 3, 0.3)).unwrap();

    assert_eq!(
        in_mem.contents(),
        format!(
            "compiled core\n |{}{}| 3/10 30.00%",
            "█".repeat(19),
            "░".repeat(45)
        )
    );
}

#[test]
fn forced_newline_appends_instead_of_redrawing() {
    let in_mem = InMemoryTerm::new(10, 80);
    let gauge = gauge_on(&in_mem).with_style(
        GaugeStyle::default()
            .width_limit(21)
            .force_newline(true),
    );

    gauge.render(RenderRequest::new(10, 5, 0.5)).unwrap();
    gauge.render(RenderRequest::new(10, 8, 0.8)).unwrap();

    assert_eq!(
        in_mem.contents(),
        " |██░░░| 5/10 50.00%\n |████░| 8/10 80.00%"
    );
}

/// An in-memory terminal whose reported width can change between renders,
/// the way a real terminal does when resized.
#[derive(Debug, Clone)]
struct ResizableTerm {
    inner: InMemoryTerm,
    width: Arc<Mutex<u16>>,
}

impl TermLike for ResizableTerm {
    fn width(&self) -> u16 {
        *self.width.lock().unwrap()
    }

    fn write_str(&self, s: &str) -> io::Result<()> {
        self.inner.write_str(s)
    }

    fn flush(&self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[test]
fn width_is_queried_fresh_on_every_render() {
    let term = ResizableTerm {
        inner: InMemoryTerm::new(10, 80),
        width: Arc::new(Mutex::new(80)),
    };
    let gauge = Gauge::with_draw_target(GaugeDrawTarget::term_like(Box::new(term.clone())));

    gauge.render(RenderRequest::new(0, 0, 0.5)).unwrap();
    assert_eq!(
        term.inner.contents(),
        format!(" |{}{}| 50.00%", "█".repeat(34), "░".repeat(35))
    );

    *term.width.lock().unwrap() = 30;
    gauge.render(RenderRequest::new(0, 0, 0.5)).unwrap();
    assert_eq!(
        term.inner.contents(),
        format!(" |{}{}| 50.00%", "█".repeat(9), "░".repeat(10))
    );
}

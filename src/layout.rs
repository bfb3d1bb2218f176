use console::measure_text_width;

use crate::state::RenderRequest;
use crate::style::GaugeStyle;

// Column accounting, all in display columns.
const ANNOTATION_SEP_COLS: usize = 3; // " | ", " + " and " = " each cost 3
const PERCENT_COLS: usize = 7; // "100.00%"
const BAR_DECORATION_COLS: usize = 4; // " |" and "| "
const MIN_BAR_BUDGET: usize = 8; // at or below this, no bar glyphs are drawn

/// The subset of elements that survived degradation for one render, plus the
/// final bar split. Computed per call, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    pub(crate) prefix: Option<String>,
    pub(crate) max: u64,
    pub(crate) val: u64,
    pub(crate) done: f64,
    pub(crate) prev: Option<String>,
    pub(crate) next: Option<String>,
    pub(crate) full: Option<String>,
    /// `(filled, empty)` glyph counts; `None` when the bar section is omitted.
    pub(crate) bar: Option<(usize, usize)>,
}

impl Layout {
    /// Decides what fits in `term_width` columns.
    ///
    /// When the fixed text overruns the budget, exactly one element is
    /// dropped per pass, in fixed priority order: `full`, then `prev`, then
    /// the prefix, then the `val/max` counter. The terminal case clamps the
    /// bar budget to zero, so a percentage-only line always renders even if
    /// it slightly overruns the available width. Each pass strictly shrinks
    /// the fixed footprint, so at most four elements are ever dropped.
    ///
    /// Drops here are per-call only; the annotation latch has already run
    /// and is not consulted or updated.
    pub(crate) fn compute(req: &RenderRequest, style: &GaugeStyle, term_width: usize) -> Layout {
        let mut prefix = req
            .prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
        let mut max = req.max;
        let mut prev = req.prev.as_deref().map(|s| s.trim().to_owned());
        let next = req.next.as_deref().map(|s| s.trim().to_owned());
        let mut full = req.full.as_deref().map(|s| s.trim().to_owned());

        let available = style.width_limit.min(term_width);
        let budget = loop {
            let mut fixed = PERCENT_COLS;
            // Each present annotation is charged its own text width plus a
            // separator allowance; for three annotations the allowances add
            // up to exactly the " | ", " + " and " = " joiners the phrase
            // uses. Present-but-blank annotations still pay the separator:
            // they keep their slot in the template index.
            fixed += [&prev, &next, &full]
                .iter()
                .filter_map(|a| a.as_deref())
                .map(|a| ANNOTATION_SEP_COLS + measure_text_width(a))
                .sum::<usize>();
            if let Some(prefix) = &prefix {
                fixed += measure_text_width(prefix) + 2;
            }
            if max > 0 {
                fixed += counter_cols(max);
            }

            if let Some(budget) = available.checked_sub(fixed) {
                break budget;
            }
            // `next` is never dropped: it costs no columns beyond the
            // separator allowance already reserved for it.
            if full.is_some() {
                full = None;
            } else if prev.is_some() {
                prev = None;
            } else if prefix.is_some() {
                prefix = None;
            } else if max != 0 {
                max = 0;
            } else {
                break 0;
            }
        };

        let bar = if budget > MIN_BAR_BUDGET {
            // The widest glyph governs the split, so the bar never overruns
            // its budget even with double-width glyphs.
            let bar_cols = (budget - BAR_DECORATION_COLS) / style.char_width;
            let filled = (bar_cols as f64 * req.done) as usize;
            Some((filled, bar_cols - filled))
        } else {
            None
        };

        Layout {
            prefix,
            max,
            val: req.val,
            done: req.done,
            prev,
            next,
            full,
            bar,
        }
    }

    /// Presence bits for the annotation triad: `4·prev + 2·next + 1·full`,
    /// a value in `[0, 7]` selecting one of the eight phrase templates.
    pub(crate) fn annotation_index(&self) -> usize {
        (self.prev.is_some() as usize) * 4
            + (self.next.is_some() as usize) * 2
            + (self.full.is_some() as usize)
    }

    /// Renders the annotation phrase for the current presence bits. Returns
    /// `None` when no annotation is present, or when every present one trims
    /// to an empty string.
    pub(crate) fn annotation_phrase(&self) -> Option<String> {
        let shown = [&self.prev, &self.next, &self.full]
            .iter()
            .any(|a| a.as_deref().map_or(false, |s| !s.trim().is_empty()));
        if !shown {
            return None;
        }
        Some(
            match (
                self.prev.as_deref(),
                self.next.as_deref(),
                self.full.as_deref(),
            ) {
                (None, None, None) => String::new(),
                (None, None, Some(full)) => full.to_owned(),
                (None, Some(next), None) => next.to_owned(),
                (None, Some(next), Some(full)) => format!("{next} = {full}"),
                (Some(prev), None, None) => prev.to_owned(),
                (Some(prev), None, Some(full)) => format!("{prev} / {full}"),
                (Some(prev), Some(next), None) => format!("{prev} + {next}"),
                (Some(prev), Some(next), Some(full)) => format!("{prev} + {next} = {full}"),
            },
        )
    }
}

/// Columns for the `"val/max "` counter: two digits-of-`max` fields plus the
/// slash and trailing space allowance.
fn counter_cols(max: u64) -> usize {
    (max as f64).log10() as usize * 2 + 3
}

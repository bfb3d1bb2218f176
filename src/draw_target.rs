use std::io;

use console::Term;

use crate::TermLike;

/// Target for draw operations
///
/// This tells a gauge where to paint to. The kinds differ only in where the
/// composed line ends up and in how the live terminal width is obtained.
#[derive(Debug)]
pub struct GaugeDrawTarget {
    kind: TargetKind,
}

impl GaugeDrawTarget {
    /// Draw to a buffered stdout terminal.
    ///
    /// For more information see [`GaugeDrawTarget::term`].
    pub fn stdout() -> Self {
        Self::term(Term::buffered_stdout())
    }

    /// Draw to a buffered stderr terminal.
    ///
    /// For more information see [`GaugeDrawTarget::term`].
    pub fn stderr() -> Self {
        Self::term(Term::buffered_stderr())
    }

    /// Draw to a terminal.
    ///
    /// Gauges are by default drawn to terminals, however if the terminal is
    /// not user attended the whole gauge is hidden. This is done so that
    /// piping to a file will not produce useless escape codes in that file.
    pub fn term(term: Term) -> Self {
        Self {
            kind: TargetKind::Term(term),
        }
    }

    /// Draw to a boxed object that implements the [`TermLike`] trait.
    pub fn term_like(term_like: Box<dyn TermLike>) -> Self {
        Self {
            kind: TargetKind::TermLike(term_like),
        }
    }

    /// A hidden draw target.
    ///
    /// This forces a gauge to be not rendered at all.
    pub fn hidden() -> Self {
        Self {
            kind: TargetKind::Hidden,
        }
    }

    /// Returns true if the draw target is hidden.
    ///
    /// This is internally used in gauges to figure out if overhead from
    /// rendering can be prevented.
    pub fn is_hidden(&self) -> bool {
        match &self.kind {
            TargetKind::Hidden => true,
            TargetKind::Term(term) => !term.is_term(),
            TargetKind::TermLike(_) => false,
        }
    }

    /// Returns the current width of the draw target in columns.
    pub(crate) fn width(&self) -> u16 {
        match &self.kind {
            TargetKind::Term(term) => term.size().1,
            TargetKind::TermLike(inner) => inner.width(),
            TargetKind::Hidden => 0,
        }
    }

    /// Writes one fully composed line and flushes, as a single operation, so
    /// other writers sharing the stream never observe a partial line.
    pub(crate) fn write_flushed(&self, s: &str) -> io::Result<()> {
        match &self.kind {
            TargetKind::Term(term) => {
                term.write_str(s)?;
                term.flush()
            }
            TargetKind::TermLike(inner) => {
                inner.write_str(s)?;
                inner.flush()
            }
            TargetKind::Hidden => Ok(()),
        }
    }
}

#[derive(Debug)]
enum TargetKind {
    Term(Term),
    TermLike(Box<dyn TermLike>),
    Hidden,
}

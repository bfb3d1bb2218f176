use std::fmt::Debug;
use std::io;

use console::Term;

/// A trait for minimal terminal-like behavior.
///
/// The gauge needs exactly three things from its output device: the current
/// display width in columns (queried fresh on every render, so live resizes
/// are picked up), a raw string write, and a flush. Anything that implements
/// this trait can be used as a draw target via [`GaugeDrawTarget::term_like`].
///
/// [`GaugeDrawTarget::term_like`]: crate::GaugeDrawTarget::term_like
pub trait TermLike: Debug + Send + Sync {
    /// Return the terminal width
    fn width(&self) -> u16;

    /// Write a string, without any line handling
    fn write_str(&self, s: &str) -> io::Result<()>;

    fn flush(&self) -> io::Result<()>;
}

impl TermLike for Term {
    fn width(&self) -> u16 {
        self.size().1
    }

    fn write_str(&self, s: &str) -> io::Result<()> {
        Term::write_str(self, s)
    }

    fn flush(&self) -> io::Result<()> {
        Term::flush(self)
    }
}

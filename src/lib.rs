//! termgauge renders a single-line, in-place-updating progress gauge on a
//! text terminal of variable, possibly changing, width.
//!
//! A rendered line combines a prefix label, a numeric progress bar, a
//! completion percentage and an optional triad of free-form time annotations
//! (elapsed, remaining, total). The line never wraps: on every render the
//! terminal width is queried fresh and elements that no longer fit are
//! dropped in a fixed priority order, down to a percentage-only minimum.
//! A trailing erase sequence guarantees a previously wider render leaves no
//! visual artifacts.
//!
//! Annotations are sticky in the negative: once a render omits one of the
//! three time annotations, that annotation stays disabled for the lifetime
//! of the gauge, even if later renders supply it again.
//!
//! # Example
//!
//! ```rust,no_run
//! use termgauge::{Gauge, RenderRequest};
//!
//! fn main() -> std::io::Result<()> {
//!     let gauge = Gauge::new();
//!     for i in 0..=100u64 {
//!         let req = RenderRequest::new(100, i, i as f64 / 100.0).with_prefix("Build");
//!         gauge.render(req)?;
//!     }
//!     gauge.println("build finished")?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations)]

mod draw_target;
mod gauge;
#[cfg(feature = "in_memory")]
mod in_memory;
mod layout;
mod state;
mod style;
mod term_like;

pub use crate::draw_target::GaugeDrawTarget;
pub use crate::gauge::Gauge;
#[cfg(feature = "in_memory")]
#[cfg_attr(docsrs, doc(cfg(feature = "in_memory")))]
pub use crate::in_memory::InMemoryTerm;
pub use crate::state::RenderRequest;
pub use crate::style::GaugeStyle;
pub use crate::term_like::TermLike;

//! Report Module
//!
//! Renders a flushed bulk to the console and to a freshly created log file:
//! - Reporter: the seam the bulks flush through
//! - FileReporter: console mirror plus one timestamp-named file per flush
//! - LogNamer: timestamp-derived, strictly increasing file names

mod naming;
mod reporter;

#[cfg(test)]
mod memory;

pub use naming::LogNamer;
pub use reporter::{FileReporter, Reporter};

#[cfg(test)]
pub(crate) use memory::{FailingReporter, MemoryReporter};

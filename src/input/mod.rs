//! Input Module
//!
//! Reads commands line by line from an async source and feeds them to the
//! bulk coordinator until end of stream.

mod reader;
pub use reader::{CommandReader, RunSummary};

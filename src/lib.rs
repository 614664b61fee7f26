//! This crate groups a stream of text commands into bulks and reports each
//! bulk to the console and to its own log file. Static bulks flush at a fixed
//! size; dynamic bulks are delimited by `{` and `}` lines in the input.

pub mod types; // Commands, delimiters, bulk metadata.
pub mod error; // Reporting errors.
pub mod report; // Console and log file output for flushed bulks.
pub mod bulk; // Static and dynamic bulks and the coordinator routing between them.
pub mod input; // Async line reader driving the coordinator.
pub mod config; // Defines and loads configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use bulk::BulkCoordinator;
pub use error::BulkError;

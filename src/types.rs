use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// A single input line. Opaque to the bulk machinery and moved into
/// exactly one bulk.
pub type Command = String;

/// Opens a dynamic block when it makes up a whole line.
pub const OPEN_DELIMITER: &str = "{";

/// Closes a dynamic block when it makes up a whole line.
pub const CLOSE_DELIMITER: &str = "}";

/// Classification of one incoming line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Payload(Command),
}

impl Token {
    /// Classify a line by exact comparison against the delimiters.
    /// Anything else, including lines that merely contain a brace, is payload.
    pub fn classify(cmd: Command) -> Self {
        match cmd.as_str() {
            OPEN_DELIMITER => Token::Open,
            CLOSE_DELIMITER => Token::Close,
            _ => Token::Payload(cmd),
        }
    }
}

/// Which policy produced a bulk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkKind {
    /// Flushed because the fixed capacity was reached, a block opened, or input ended
    Static,
    /// Flushed because a delimited block was balanced
    Dynamic,
}

impl fmt::Display for BulkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkKind::Static => write!(f, "static"),
            BulkKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Where a flushed bulk ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub line_count: usize,
}

/// Bookkeeping for one completed flush
#[derive(Debug, Clone)]
pub struct BulkMetadata {
    pub bulk_id: u64,
    pub kind: BulkKind,
    pub command_count: usize,
    pub path: PathBuf,
    pub sealed_at: DateTime<Utc>,
}

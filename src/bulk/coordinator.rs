//! Bulk Coordinator Module
//!
//! Drives the two bulk policies from a single stream of lines.
//!
//! # Routing
//! 1. `{` flushes a non-empty static bulk, then opens (or nests) a dynamic block
//! 2. `}` closes one level; returning to depth 0 flushes the dynamic bulk
//! 3. Anything else goes to the dynamic bulk inside a block, the static bulk otherwise
//!
//! Delimiters are never stored. Depth is a signed counter: an unmatched `}`
//! drives it negative, and routing stays dynamic until it is exactly 0 again.

use crate::bulk::{DynamicBulk, StaticBulk};
use crate::error::BulkResult;
use crate::report::Reporter;
use crate::{BulkKind, BulkMetadata, Command, ReportArtifact, Token};
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Owns both bulks, the block depth and the reporter they flush through
pub struct BulkCoordinator<R: Reporter> {
    static_bulk: StaticBulk,
    dynamic_bulk: DynamicBulk,
    /// Unmatched open delimiters; non-zero means dynamic routing
    depth: i64,
    reporter: R,
    /// Id for the next reported bulk (starts at 1)
    next_bulk_id: u64,
}

impl<R: Reporter> BulkCoordinator<R> {
    /// Creates a coordinator with an empty static bulk of `capacity`
    ///
    /// # Arguments
    /// * `capacity` - Commands per static bulk
    /// * `reporter` - Destination every flushed bulk is written to
    pub fn new(capacity: NonZeroUsize, reporter: R) -> Self {
        Self {
            static_bulk: StaticBulk::new(capacity),
            dynamic_bulk: DynamicBulk::new(),
            depth: 0,
            reporter,
            next_bulk_id: 1,
        }
    }

    /// Feed one line into the state machine
    ///
    /// Any single line causes at most one flush.
    ///
    /// # Returns
    /// * `Ok(Some(metadata))` if this line caused a bulk to be reported
    /// * `Ok(None)` otherwise
    /// * `Err` if reporting failed; the bulk being flushed keeps its contents
    pub fn add(&mut self, cmd: Command) -> BulkResult<Option<BulkMetadata>> {
        match Token::classify(cmd) {
            Token::Open => {
                let artifact = if self.static_bulk.is_empty() {
                    None
                } else {
                    debug!(
                        "Block opened, flushing {}/{} pending static commands",
                        self.static_bulk.len(),
                        self.static_bulk.capacity()
                    );
                    self.static_bulk.flush(&mut self.reporter)?
                };
                self.depth += 1;
                Ok(self.seal(BulkKind::Static, artifact))
            }
            Token::Close => {
                let next = self.depth - 1;
                if next < 0 {
                    warn!("Unmatched block close, depth is now {}", next);
                }
                // Depth only moves once the block has been reported
                let artifact = if next == 0 {
                    self.dynamic_bulk.flush(&mut self.reporter)?
                } else {
                    None
                };
                self.depth = next;
                Ok(self.seal(BulkKind::Dynamic, artifact))
            }
            Token::Payload(cmd) if self.depth != 0 => {
                self.dynamic_bulk.add(cmd);
                Ok(None)
            }
            Token::Payload(cmd) => {
                let artifact = self.static_bulk.add(cmd, &mut self.reporter)?;
                Ok(self.seal(BulkKind::Static, artifact))
            }
        }
    }

    /// End of input: report whatever the static bulk holds
    ///
    /// An unterminated dynamic block is dropped, not reported.
    pub fn shutdown(&mut self) -> BulkResult<Option<BulkMetadata>> {
        if self.depth != 0 {
            warn!(
                "Input ended inside a block (depth {}), dropping {} commands",
                self.depth,
                self.dynamic_bulk.len()
            );
        }
        let artifact = self.static_bulk.flush(&mut self.reporter)?;
        Ok(self.seal(BulkKind::Static, artifact))
    }

    /// Current block depth: 0 outside a block, negative after unmatched closes
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Commands waiting in the static bulk
    pub fn pending_static(&self) -> usize {
        self.static_bulk.len()
    }

    /// Commands collected by the currently open block
    pub fn pending_dynamic(&self) -> usize {
        self.dynamic_bulk.len()
    }

    /// The reporter bulks are flushed through
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consume the coordinator, handing back its reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Assign an id to a completed flush and log it
    fn seal(&mut self, kind: BulkKind, artifact: Option<ReportArtifact>) -> Option<BulkMetadata> {
        let artifact = artifact?;
        let metadata = BulkMetadata {
            bulk_id: self.next_bulk_id,
            kind,
            command_count: artifact.line_count,
            path: artifact.path,
            sealed_at: chrono::Utc::now(),
        };
        self.next_bulk_id += 1;

        info!(
            "Bulk #{} ({}) reported with {} commands to {} at {}",
            metadata.bulk_id,
            metadata.kind,
            metadata.command_count,
            metadata.path.display(),
            metadata.sealed_at.to_rfc3339()
        );
        Some(metadata)
    }
}

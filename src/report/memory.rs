//! In-memory reporters for exercising the bulk state machine.

use super::Reporter;
use crate::error::{BulkError, BulkResult};
use crate::{Command, ReportArtifact};
use std::io;
use std::path::PathBuf;

/// Records every non-empty flush in order
#[derive(Default)]
pub struct MemoryReporter {
    pub reports: Vec<Vec<Command>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, commands: &[Command]) -> BulkResult<Option<ReportArtifact>> {
        if commands.is_empty() {
            return Ok(None);
        }
        let path = PathBuf::from(format!("memory/{}", self.reports.len()));
        self.reports.push(commands.to_vec());
        Ok(Some(ReportArtifact {
            path,
            line_count: commands.len(),
        }))
    }
}

/// Fails every non-empty flush as if the log file could not be created
#[derive(Default)]
pub struct FailingReporter {
    pub attempts: usize,
}

impl Reporter for FailingReporter {
    fn report(&mut self, commands: &[Command]) -> BulkResult<Option<ReportArtifact>> {
        if commands.is_empty() {
            return Ok(None);
        }
        self.attempts += 1;
        Err(BulkError::CreateReport {
            path: PathBuf::from("unwritable.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

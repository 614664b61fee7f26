//! Unbounded bulk for delimited blocks.

use crate::error::BulkResult;
use crate::report::Reporter;
use crate::{Command, ReportArtifact};

/// Bulk with no size limit; only flushed when told to
#[derive(Default)]
pub struct DynamicBulk {
    commands: Vec<Command>,
}

impl DynamicBulk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Report the current contents and clear them.
    /// On a reporting error the contents are left in place.
    pub fn flush<R: Reporter + ?Sized>(
        &mut self,
        reporter: &mut R,
    ) -> BulkResult<Option<ReportArtifact>> {
        let artifact = reporter.report(&self.commands)?;
        self.commands.clear();
        Ok(artifact)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

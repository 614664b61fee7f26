//! Fixed-capacity bulk.

use crate::error::BulkResult;
use crate::report::Reporter;
use crate::{Command, ReportArtifact};
use std::num::NonZeroUsize;

/// Bulk that flushes itself once it holds `capacity` commands
pub struct StaticBulk {
    commands: Vec<Command>,
    capacity: NonZeroUsize,
}

impl StaticBulk {
    /// Creates an empty bulk with room for `capacity` commands reserved up front
    ///
    /// # Arguments
    /// * `capacity` - Number of commands that triggers an automatic flush
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Append `cmd`, flushing through `reporter` when the bulk becomes full
    ///
    /// # Returns
    /// The artifact of the automatic flush, if this command triggered one
    pub fn add<R: Reporter + ?Sized>(
        &mut self,
        cmd: Command,
        reporter: &mut R,
    ) -> BulkResult<Option<ReportArtifact>> {
        self.commands.push(cmd);
        if self.commands.len() == self.capacity.get() {
            return self.flush(reporter);
        }
        Ok(None)
    }

    /// Report the current contents and clear them, keeping the reserved storage.
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

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

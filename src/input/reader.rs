//! Command Reader
//!
//! Pulls lines from any `AsyncBufRead` (stdin in the binary) and pushes them
//! through the coordinator one at a time. Pacing between lines lives here;
//! the coordinator itself never waits.
//!
//! Lines are read as raw bytes; anything that is not valid UTF-8 is decoded
//! lossily rather than ending the run.

use crate::Command;
use crate::bulk::BulkCoordinator;
use crate::report::Reporter;
use anyhow::Context;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Duration, sleep};
use tracing::{debug, info};

/// Totals for one run over an input stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read, delimiters included
    pub commands_read: usize,
    pub bulks_reported: usize,
    /// Commands left in an unterminated block at end of input
    pub dropped_dynamic: usize,
}

/// Line source feeding a `BulkCoordinator`
pub struct CommandReader<R> {
    source: R,
    /// Raw bytes of the line being read
    buf: Vec<u8>,
    /// Delay after each line
    pacing: Duration,
}

impl<R: AsyncBufRead + Unpin> CommandReader<R> {
    /// Creates a reader over `source`
    ///
    /// # Arguments
    /// * `source` - Buffered input, one command per line
    /// * `pacing` - Delay after each line; `Duration::ZERO` reads as fast as possible
    pub fn new(source: R, pacing: Duration) -> Self {
        Self {
            source,
            buf: Vec::new(),
            pacing,
        }
    }

    /// Next line without its `\n` or `\r\n` terminator, `None` at end of stream
    async fn next_command(&mut self) -> io::Result<Option<Command>> {
        self.buf.clear();
        if self.source.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// Feed every line to `coordinator`, then shut it down at end of stream
    ///
    /// # Returns
    /// * `Ok(RunSummary)` once the input is exhausted and the final static bulk is reported
    /// * `Err` on the first read or report failure; nothing after it is processed
    pub async fn run<P: Reporter>(
        mut self,
        coordinator: &mut BulkCoordinator<P>,
    ) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        while let Some(line) = self
            .next_command()
            .await
            .context("failed to read command from input")?
        {
            summary.commands_read += 1;
            debug!("Read command #{}: {:?}", summary.commands_read, line);

            if coordinator
                .add(line)
                .context("failed to report bulk")?
                .is_some()
            {
                summary.bulks_reported += 1;
            }

            if !self.pacing.is_zero() {
                sleep(self.pacing).await;
            }
        }

        summary.dropped_dynamic = coordinator.pending_dynamic();
        if coordinator
            .shutdown()
            .context("failed to report final bulk")?
            .is_some()
        {
            summary.bulks_reported += 1;
        }

        info!(
            "Input finished: {} commands read, {} bulks reported, {} dropped",
            summary.commands_read, summary.bulks_reported, summary.dropped_dynamic
        );
        Ok(summary)
    }
}

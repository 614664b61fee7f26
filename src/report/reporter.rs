//! Bulk Reporter
//!
//! Flushed bulks end up here. Each non-empty flush is printed to the console
//! and written to a brand new file, one command per line, in the same pass.

use super::LogNamer;
use crate::config::ReportConfig;
use crate::error::{BulkError, BulkResult};
use crate::{Command, ReportArtifact};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use tracing::debug;

/// Destination for flushed bulks
///
/// Implementations must do nothing for an empty slice and return `Ok(None)`.
pub trait Reporter {
    /// Report `commands` in order.
    ///
    /// # Returns
    /// * `Ok(Some(artifact))` when the bulk was written out
    /// * `Ok(None)` when `commands` was empty
    /// * `Err` if any part of the output failed
    fn report(&mut self, commands: &[Command]) -> BulkResult<Option<ReportArtifact>>;
}

/// Console + log file reporter
pub struct FileReporter<W: Write> {
    /// Directory new report files are created in
    directory: PathBuf,
    namer: LogNamer,
    /// Console mirror, stdout in the binary
    console: W,
}

impl FileReporter<Stdout> {
    /// Reporter printing to stdout, configured from the `[report]` section
    pub fn stdout(config: &ReportConfig) -> Self {
        Self::with_console(config.directory.clone(), &config.extension, io::stdout())
    }
}

impl<W: Write> FileReporter<W> {
    /// Creates a reporter mirroring every bulk to `console`
    ///
    /// # Arguments
    /// * `directory` - Existing directory report files are created in
    /// * `extension` - File extension without the dot, e.g. `log`
    /// * `console` - Writer receiving the same lines as each file
    pub fn with_console(directory: impl Into<PathBuf>, extension: &str, console: W) -> Self {
        Self {
            directory: directory.into(),
            namer: LogNamer::new(extension),
            console,
        }
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    /// Create the report file; refuses to touch an existing one
    fn create_file(&mut self) -> BulkResult<(PathBuf, BufWriter<File>)> {
        let path = self.namer.next_path(&self.directory);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| BulkError::CreateReport {
                path: path.clone(),
                source,
            })?;
        Ok((path, BufWriter::new(file)))
    }
}

impl<W: Write> Reporter for FileReporter<W> {
    fn report(&mut self, commands: &[Command]) -> BulkResult<Option<ReportArtifact>> {
        if commands.is_empty() {
            return Ok(None);
        }

        // Opened first so a creation failure prints nothing
        let (path, mut file) = self.create_file()?;
        let write_err = |source: io::Error| BulkError::WriteReport {
            path: path.clone(),
            source,
        };

        for cmd in commands {
            writeln!(self.console, "{cmd}").map_err(BulkError::Console)?;
            writeln!(file, "{cmd}").map_err(write_err)?;
        }

        file.flush().map_err(write_err)?;
        self.console.flush().map_err(BulkError::Console)?;

        debug!("Wrote {} commands to {}", commands.len(), path.display());

        Ok(Some(ReportArtifact {
            path,
            line_count: commands.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// Fresh scratch directory unique to this process and test
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bulk-report-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }

    fn commands(items: &[&str]) -> Vec<Command> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_bulk_creates_nothing() {
        let dir = scratch_dir("empty");
        let mut reporter = FileReporter::with_console(&dir, "log", Vec::new());

        let artifact = reporter.report(&[]).unwrap();

        assert!(artifact.is_none());
        assert!(reporter.console().is_empty());
        assert!(files_in(&dir).is_empty());
    }

    #[test]
    fn console_and_file_match_line_for_line() {
        let dir = scratch_dir("mirror");
        let mut reporter = FileReporter::with_console(&dir, "log", Vec::new());

        let artifact = reporter
            .report(&commands(&["cmd1", "cmd2", "cmd3"]))
            .unwrap()
            .expect("non-empty bulk is reported");

        assert_eq!(artifact.line_count, 3);
        assert_eq!(files_in(&dir), vec![artifact.path.clone()]);

        let console = String::from_utf8(reporter.console().clone()).unwrap();
        let file = fs::read_to_string(&artifact.path).unwrap();
        assert_eq!(console, "cmd1\ncmd2\ncmd3\n");
        assert_eq!(file, console);
    }

    #[test]
    fn each_flush_gets_its_own_file() {
        let dir = scratch_dir("unique");
        let mut reporter = FileReporter::with_console(&dir, "log", Vec::new());

        let first = reporter.report(&commands(&["a"])).unwrap().unwrap();
        let second = reporter.report(&commands(&["b"])).unwrap().unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(files_in(&dir).len(), 2);
        assert_eq!(fs::read_to_string(&first.path).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(&second.path).unwrap(), "b\n");
    }

    #[test]
    fn existing_file_is_never_overwritten() {
        let dir = scratch_dir("clash");
        let taken = dir.join(format!("{}.log", i64::MAX));
        fs::write(&taken, b"earlier report\n").unwrap();

        // Next name the reporter picks is exactly `taken`
        let mut reporter = FileReporter {
            directory: dir.clone(),
            namer: LogNamer::resuming_after("log", i64::MAX - 1),
            console: Vec::new(),
        };

        let err = reporter.report(&commands(&["a", "b"])).unwrap_err();

        match err {
            BulkError::CreateReport { path, source } => {
                assert_eq!(path, taken);
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(reporter.console().is_empty());
        assert_eq!(fs::read(&taken).unwrap(), b"earlier report\n");
        assert_eq!(files_in(&dir), vec![taken]);
    }

    #[test]
    fn missing_directory_fails_before_printing() {
        let dir = scratch_dir("missing").join("does-not-exist");
        let mut reporter = FileReporter::with_console(&dir, "log", Vec::new());

        let err = reporter.report(&commands(&["a"])).unwrap_err();

        assert!(matches!(err, BulkError::CreateReport { .. }));
        assert!(reporter.console().is_empty());
    }
}

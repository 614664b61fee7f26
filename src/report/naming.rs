//! Log File Naming
//!
//! Report files are named after the wall clock in nanoseconds since the
//! Unix epoch, e.g. `1700000000123456789.log`. The clock alone can repeat
//! (coarse resolution, clock steps backwards), so the namer never hands out
//! a stamp lower than or equal to the previous one.

use chrono::Utc;
use std::path::{Path, PathBuf};

/// Hands out report file names for one process
pub struct LogNamer {
    /// File extension without the leading dot
    extension: String,
    /// Last stamp handed out, 0 before the first call
    last_stamp: i64,
}

impl LogNamer {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            last_stamp: 0,
        }
    }

    /// Namer that behaves as if `last_stamp` had already been handed out
    #[cfg(test)]
    pub(crate) fn resuming_after(extension: impl Into<String>, last_stamp: i64) -> Self {
        Self {
            extension: extension.into(),
            last_stamp,
        }
    }

    /// Next stamp: the current clock reading, bumped past the previous stamp
    /// if the clock has not advanced.
    pub fn next_stamp(&mut self) -> i64 {
        // None only past the year 2262
        let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        let stamp = now.max(self.last_stamp.saturating_add(1));
        self.last_stamp = stamp;
        stamp
    }

    /// Full path of the next report file inside `dir`
    pub fn next_path(&mut self, dir: &Path) -> PathBuf {
        let stamp = self.next_stamp();
        dir.join(self.file_name(stamp))
    }

    fn file_name(&self, stamp: i64) -> String {
        if self.extension.is_empty() {
            stamp.to_string()
        } else {
            format!("{}.{}", stamp, self.extension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_strictly_increase() {
        let mut namer = LogNamer::new("log");
        let mut prev = namer.next_stamp();
        for _ in 0..1000 {
            let next = namer.next_stamp();
            assert!(next > prev, "{next} should be greater than {prev}");
            prev = next;
        }
    }

    #[test]
    fn stamp_tracks_wall_clock() {
        let before = Utc::now().timestamp_nanos_opt().unwrap();
        let stamp = LogNamer::new("log").next_stamp();
        let after = Utc::now().timestamp_nanos_opt().unwrap();
        assert!(stamp >= before && stamp <= after);
    }

    #[test]
    fn path_uses_directory_and_extension() {
        let mut namer = LogNamer::new("log");
        let path = namer.next_path(Path::new("out"));
        assert_eq!(path.parent(), Some(Path::new("out")));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("log"));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap();
        assert!(stem.parse::<i64>().is_ok());
    }

    #[test]
    fn stamp_never_goes_behind_previous() {
        let mut namer = LogNamer::resuming_after("log", i64::MAX - 1);
        assert_eq!(namer.next_stamp(), i64::MAX);
    }

    #[test]
    fn empty_extension_leaves_bare_stamp() {
        let mut namer = LogNamer::new("");
        let path = namer.next_path(Path::new("."));
        let name = path.file_name().and_then(|s| s.to_str()).unwrap();
        assert!(name.parse::<i64>().is_ok());
    }
}

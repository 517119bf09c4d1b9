//! Descriptor files: one cron line per row, enabled and disabled as a group.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, CronEntry};

/// Parsed contents of a descriptor file.
///
/// The group identifier is derived from the descriptor path, so every
/// manager (and every run) derives the same identifier for the same file.
#[derive(Debug, Clone)]
pub struct GroupDescriptor {
    group: String,
    entries: Vec<CronEntry>,
}

impl GroupDescriptor {
    /// Read and parse a descriptor file.
    ///
    /// Fails with [`AppError::InvalidArgument`] when the path is missing or
    /// unreadable, or when any line fails to parse. Validation happens
    /// before any manager state is touched.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(AppError::InvalidArgument {
                path: display,
                details: "no such file".to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| AppError::InvalidArgument {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::parse(&display, &content)
    }

    /// Parse descriptor text. Blank lines and `#`-prefixed comment lines
    /// are skipped; everything else must be a valid cron line.
    pub fn parse(group: &str, content: &str) -> Result<Self, AppError> {
        let mut entries = Vec::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let entry = CronEntry::parse(trimmed).map_err(|e| AppError::InvalidArgument {
                path: group.to_string(),
                details: e.to_string(),
            })?;
            entries.push(entry);
        }
        Ok(Self { group: group.to_string(), entries })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn entries(&self) -> &[CronEntry] {
        &self.entries
    }

    pub fn into_parts(self) -> (String, Vec<CronEntry>) {
        (self.group, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blanks_and_comments() {
        let content = "# managed jobs\n\n1 2 3 4 5 uptime\n\n# another note\n2 3 4 5 6 w\n";
        let descriptor = GroupDescriptor::parse("/tmp/a1", content).unwrap();
        assert_eq!(descriptor.group(), "/tmp/a1");
        assert_eq!(descriptor.entries().len(), 2);
        assert_eq!(descriptor.entries()[0].command, "/usr/bin/uptime");
        assert_eq!(descriptor.entries()[1].command, "/usr/bin/w");
    }

    #[test]
    fn invalid_line_fails_whole_descriptor() {
        let content = "1 2 3 4 5 uptime\nthis is not a valid cronfile\n";
        let err = GroupDescriptor::parse("/tmp/a1", content).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = GroupDescriptor::load(Path::new("/not-existent-file.oo")).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
    }

    #[test]
    fn load_reads_entries_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enable.txt");
        fs::write(&path, "1 2 3 4 5 uptime\n").unwrap();

        let descriptor = GroupDescriptor::load(&path).unwrap();
        assert_eq!(descriptor.entries().len(), 1);
        assert_eq!(descriptor.group(), path.display().to_string());
    }
}

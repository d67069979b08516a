//! CSV report writing and summary formatting.

use crate::models::scan::CorruptFile;
use crate::Result;
use std::path::Path;
use std::time::Duration;

/// Report layout; audio and video reports use different headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Audio,
    Video,
}

impl ReportKind {
    /// CSV header row.
    pub fn header(self) -> [&'static str; 2] {
        match self {
            ReportKind::Audio => ["File Path", "Error"],
            ReportKind::Video => ["Corrupted File Path", "Reason"],
        }
    }

    /// Whether a report with no rows is still written.
    ///
    /// The audio report is always (re)written so a clean run leaves a
    /// header-only file; video reports are only written when something failed.
    pub fn write_when_empty(self) -> bool {
        matches!(self, ReportKind::Audio)
    }
}

/// Write `rows` to `path` as CSV.
///
/// Returns `true` if the file was written. Parent directories are created.
pub fn write_report(path: &Path, kind: ReportKind, rows: &[CorruptFile]) -> Result<bool> {
    if rows.is_empty() && !kind.write_when_empty() {
        tracing::debug!("No corrupt files, skipping {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(kind.header())?;
    for row in rows {
        let file = row.path.to_string_lossy();
        writer.write_record([&*file, row.reason.as_str()])?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(true)
}

/// Format an elapsed duration as "H hours, M minutes, S seconds".
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{} hours, {} minutes, {} seconds", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0 hours, 0 minutes, 0 seconds");
        assert_eq!(
            format_elapsed(Duration::from_millis(3_725_900)),
            "1 hours, 2 minutes, 5 seconds"
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(ReportKind::Audio.header(), ["File Path", "Error"]);
        assert_eq!(ReportKind::Video.header(), ["Corrupted File Path", "Reason"]);
    }
}

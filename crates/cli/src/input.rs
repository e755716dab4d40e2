//! Reading batch inputs from JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use callmatch_core::{RecordingCandidate, ScorecardEntry};

fn read_json_array<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {:?}", what, path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {} in {:?}", what, path))
}

pub fn read_entries(path: &Path) -> Result<Vec<ScorecardEntry>> {
    read_json_array(path, "scorecard entries")
}

pub fn read_recordings(path: &Path) -> Result<Vec<RecordingCandidate>> {
    read_json_array(path, "recordings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_entries() {
        let file = write(
            r#"[
                {"call_identifier": "CALL_042", "call_date": "2024-01-10", "duration_minutes": 30},
                {"call_identifier": "Weekly Sync 5"}
            ]"#,
        );
        let entries = read_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].duration_minutes, Some(30.0));
        assert!(entries[1].call_date.is_none());
        assert!(entries[1].manager_notes.is_empty());
    }

    #[test]
    fn test_read_recordings() {
        let file = write(
            r#"[{
                "id": "rec-1",
                "title": "Sales Call CALL_042 Demo",
                "user_id": "user-1",
                "created_at": "2024-01-10T12:00:00Z",
                "duration_seconds": 1800
            }]"#,
        );
        let recordings = read_recordings(file.path()).unwrap();
        assert_eq!(recordings[0].id, "rec-1");
        assert_eq!(recordings[0].duration_seconds, Some(1800.0));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_entries(Path::new("/nonexistent/entries.json")).unwrap_err();
        assert!(err.to_string().contains("scorecard entries"));
    }

    #[test]
    fn test_not_an_array() {
        let file = write(r#"{"call_identifier": "x"}"#);
        assert!(read_entries(file.path()).is_err());
    }
}

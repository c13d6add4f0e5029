//! Local fallback log of quote submissions.
//!
//! A single JSON array on disk. Appends hold an exclusive lock on a sibling
//! `.lock` file for the whole read-modify-write, so separate handles and
//! separate processes never lose each other's records. The new array is
//! written to a unique temporary file, synced, then renamed over the log.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::DispatchError;
use crate::submission::FallbackRecord;

/// Append-only JSON log of submissions that could not be sent.
#[derive(Debug, Clone)]
pub struct LocalSubmissionLog {
    path: PathBuf,
}

impl LocalSubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log at `<data_dir>/<file_name>`.
    pub fn in_dir(data_dir: &Path, file_name: &str) -> Self {
        Self::new(data_dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, oldest first. A missing file is an empty log.
    ///
    /// Unlocked: the log is only ever replaced by rename, so a reader sees
    /// either the old array or the new one.
    pub async fn load(&self) -> Result<Vec<FallbackRecord>, DispatchError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => parse_records(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append one record and return the new record count.
    ///
    /// A log that cannot be parsed is left untouched and the append fails.
    pub async fn append(&self, record: &FallbackRecord) -> Result<usize, DispatchError> {
        let path = self.path.clone();
        let record = record.clone();
        let count = tokio::task::spawn_blocking(move || append_locked(&path, record))
            .await
            .map_err(|e| DispatchError::Io(std::io::Error::other(e)))??;

        tracing::debug!(path = %self.path.display(), count, "Submission log updated");
        Ok(count)
    }
}

fn parse_records(bytes: &[u8]) -> Result<Vec<FallbackRecord>, DispatchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// `<log file name>.lock` next to the log.
fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("submissions"));
    name.push(".lock");
    path.with_file_name(name)
}

/// Acquire the cross-process write lock. Released when the file is dropped.
fn lock_exclusive(path: &Path) -> std::io::Result<File> {
    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path(path))?;
    FileExt::lock_exclusive(&lock_file)?;
    Ok(lock_file)
}

fn append_locked(path: &Path, record: FallbackRecord) -> Result<usize, DispatchError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let _lock = lock_exclusive(path)?;

    let mut records = match std::fs::read(path) {
        Ok(bytes) => parse_records(&bytes)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    records.push(record);

    let json = serde_json::to_vec_pretty(&records)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::ImageRef;
    use chrono::{TimeZone, Utc};
    use shield_core::types::MediaType;

    fn record(name: &str) -> FallbackRecord {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 22, 4, 0).unwrap();
        FallbackRecord {
            name: name.to_string(),
            phone: "7605550123".to_string(),
            email: String::new(),
            vehicle: "2015 Honda Civic".to_string(),
            color: "Blue".to_string(),
            service_type: "shop".to_string(),
            description: String::new(),
            images: vec![ImageRef {
                name: "rear.jpg".to_string(),
                media_type: MediaType::Jpeg,
            }],
            timestamp: at,
            saved_at: at,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = LocalSubmissionLog::in_dir(dir.path(), "ds_submissions.json");
        assert!(log.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = LocalSubmissionLog::in_dir(&dir.path().join("nested"), "ds_submissions.json");

        assert_eq!(log.append(&record("first")).await.unwrap(), 1);
        assert_eq!(log.append(&record("second")).await.unwrap(), 2);

        let records = log.load().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);

        let mut left: Vec<String> = std::fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(left, vec!["ds_submissions.json", "ds_submissions.json.lock"]);
    }

    #[tokio::test]
    async fn test_corrupt_log_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds_submissions.json");
        std::fs::write(&path, "{not json").unwrap();

        let log = LocalSubmissionLog::new(&path);
        let err = log.append(&record("x")).await.unwrap_err();
        assert!(matches!(err, DispatchError::Corrupt(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds_submissions.json");
        std::fs::write(&path, "\n").unwrap();
        let log = LocalSubmissionLog::new(&path);
        assert!(log.load().await.unwrap().is_empty());
        assert_eq!(log.append(&record("x")).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_handles_keep_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds_submissions.json");
        let a = LocalSubmissionLog::new(&path);
        let b = LocalSubmissionLog::new(&path);

        let mut counts = Vec::new();
        for round in 0..25 {
            let rec_a = record(&format!("a{round}"));
            let rec_b = record(&format!("b{round}"));
            let (ra, rb) = tokio::join!(a.append(&rec_a), b.append(&rec_b));
            counts.push(ra.unwrap());
            counts.push(rb.unwrap());
        }

        counts.sort_unstable();
        assert_eq!(counts, (1..=50).collect::<Vec<_>>());

        let records = a.load().await.unwrap();
        assert_eq!(records.len(), 50);
        for round in 0..25 {
            assert!(records.iter().any(|r| r.name == format!("a{round}")));
            assert!(records.iter().any(|r| r.name == format!("b{round}")));
        }
    }
}

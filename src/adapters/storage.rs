use crate::core::{Result, SetupSubmission, SubmissionStore};
use crate::utils::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub const SUBMISSIONS_FILE: &str = "submissions.jsonl";

fn log_submission(submission: &SetupSubmission) {
    tracing::info!(
        title = %submission.title,
        author = %submission.author,
        image_url = %submission.image_url,
        "📥 Setup submission received"
    );
}

/// Records submissions in the operational log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStore;

#[async_trait]
impl SubmissionStore for LogStore {
    async fn record(&self, submission: &SetupSubmission) -> Result<()> {
        log_submission(submission);
        Ok(())
    }
}

/// One line of `submissions.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    #[serde(flatten)]
    pub submission: SetupSubmission,
    pub received_at: DateTime<Utc>,
}

/// Appends submissions as JSON lines under a local directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn submissions_file(&self) -> PathBuf {
        Path::new(&self.base_path).join(SUBMISSIONS_FILE)
    }

    pub async fn read_submissions(&self) -> Result<Vec<StoredSubmission>> {
        let path = self.submissions_file();
        if !tokio::fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&path).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl SubmissionStore for LocalStorage {
    async fn record(&self, submission: &SetupSubmission) -> Result<()> {
        let full_path = self.submissions_file();
        let storage_error = |e: std::io::Error| AppError::StorageError {
            message: format!("{}: {}", full_path.display(), e),
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }

        let stored = StoredSubmission {
            submission: submission.clone(),
            received_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .await
            .map_err(storage_error)?;
        file.write_all(line.as_bytes()).await.map_err(storage_error)?;
        file.flush().await.map_err(storage_error)?;

        tracing::debug!("Appended submission to {}", full_path.display());
        log_submission(submission);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn submission(title: &str) -> SetupSubmission {
        SetupSubmission {
            title: title.to_string(),
            author: "Ana".to_string(),
            image_url: "https://x.com/a.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_store_accepts_everything() {
        assert!(LogStore.record(&submission("Desk")).await.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_appends_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").to_str().unwrap().to_string();
        let storage = LocalStorage::new(base);

        storage.record(&submission("First")).await.unwrap();
        storage.record(&submission("Second")).await.unwrap();

        let stored = storage.read_submissions().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].submission.title, "First");
        assert_eq!(stored[1].submission.title, "Second");
        assert!(stored[0].received_at <= stored[1].received_at);

        let raw = std::fs::read_to_string(storage.submissions_file()).unwrap();
        let first_line: serde_json::Value =
            serde_json::from_str(raw.lines().next().unwrap()).unwrap();
        assert_eq!(first_line["imageUrl"], "https://x.com/a.png");
        assert!(first_line.get("receivedAt").is_some());
    }

    #[tokio::test]
    async fn test_read_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.read_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());

        let err = storage.record(&submission("Desk")).await.unwrap_err();
        assert!(matches!(err, AppError::StorageError { .. }));
    }
}

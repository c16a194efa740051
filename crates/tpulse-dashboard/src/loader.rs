//! Loading the dataset snapshot from disk.

use crate::error::{DashboardError, DashboardResult};
use std::path::Path;
use tpulse_common::{Dataset, SharedDataset};
use tracing::{info, instrument};

/// Reads and validates the JSON snapshot at `path`.
///
/// The file is read asynchronously; parsing and validation run on the
/// blocking pool. The result is shared read-only for the process lifetime.
#[instrument(fields(path = %path.display()))]
pub async fn load_dataset(path: &Path) -> DashboardResult<SharedDataset> {
    let content = tokio::fs::read_to_string(path).await?;
    let dataset = tokio::task::spawn_blocking(move || Dataset::from_json_str(&content))
        .await
        .map_err(|e| DashboardError::Task(e.to_string()))??;

    info!(records = dataset.len(), "Dataset snapshot loaded");
    Ok(dataset.into_shared())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tpulse_common::test_utils::fixtures;

    #[tokio::test]
    async fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixtures::sample_snapshot_json().as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_dataset(&dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(error, DashboardError::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_row_is_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"tweetId": 1, "sentiment": 7}]"#).unwrap();

        let error = load_dataset(file.path()).await.unwrap_err();
        let DashboardError::Core(core) = error else {
            panic!("expected a core error, got {error:?}");
        };
        assert!(core.is_validation());
    }
}

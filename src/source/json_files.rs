//! Reads scraped application records from a directory of JSON files.
//!
//! Each file holds an array of records produced by the out-of-scope
//! scraping step. Files are read concurrently; resolution itself stays
//! sequential in the caller.

use futures::future::join_all;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::model::{ApplicationRecord, SourceError};
use crate::source::RecordSource;

pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_file(path: PathBuf) -> Result<Vec<ApplicationRecord>, SourceError> {
        let content = fs::read_to_string(&path).await.map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SourceError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[async_trait::async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<ApplicationRecord>, SourceError> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| SourceError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| SourceError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        info!("Reading {} source files...", paths.len());
        let results = join_all(paths.into_iter().map(Self::read_file)).await;

        let mut records = Vec::new();
        for result in results {
            records.extend(result?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_records_from_all_json_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"[{"marka": "VW", "model": "Golf (1K1)"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"[{"marka": "FIAT", "model": "Doblo"}, {"marka": "OPEL", "model": "Astra G"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = JsonFileSource::new(dir.path());
        let records = source.fetch().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].marka, "VW");
        assert_eq!(records[1].model, "Doblo");
    }

    #[tokio::test]
    async fn unparsable_source_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ nope").unwrap();

        let source = JsonFileSource::new(dir.path());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}

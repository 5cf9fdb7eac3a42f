//! A JSON file-backed implementation of the [`RecordCache`][super::RecordCache]
//! trait.
//!
//! Wraps an [`InMemoryRecordCache`][super::memory::InMemoryRecordCache],
//! persisting updates to a JSON file on disk that is reloaded across
//! restarts.

use crate::cache::memory::InMemoryRecordCache;
use crate::cache::RecordCache;
use crate::error::Error;
use crate::metrics::MetricRecord;
use std::io::ErrorKind;
use tokio::fs::File;
use tokio::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A file-backed record cache. After each update the JSON state file on disk
/// is rewritten with the new data, so normalized records survive restarts.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileRecordCache {
    records: InMemoryRecordCache,
    path: String,
}

impl FileRecordCache {
    /// Save the cache state as JSON to the configured path, or return an
    /// Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if a record in the cache can't be
    /// serialized to JSON.
    ///
    /// Returns [`Error::IO`] if the serialized state can't be written to the
    /// backing file path.
    pub async fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.records)?;
        let mut output_file = File::create(&self.path).await?;
        output_file.write_all(data.as_bytes()).await?;
        output_file.flush().await?;
        Ok(())
    }

    /// Load a [`FileRecordCache`] from the JSON state located at the given
    /// path, creating an empty state file if none exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the JSON state file is invalid.
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read.
    pub async fn try_from_file(p: &str) -> Result<Self, Error> {
        let contents = match File::open(p).await {
            Ok(mut f) => {
                let mut buf = vec![];
                f.read_to_end(&mut buf).await?;
                buf
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Self::write_empty_state(File::create(&p).await?).await?,
                _ => return Err(Error::IO(err)),
            },
        };

        let records: InMemoryRecordCache = serde_json::from_slice(&contents)?;
        Ok(Self {
            records,
            path: p.to_string(),
        })
    }

    async fn write_empty_state(mut f: File) -> io::Result<Vec<u8>> {
        let default_data = serde_json::to_string_pretty(&InMemoryRecordCache::default())?;
        let default_bytes = default_data.as_bytes();
        f.write_all(default_bytes).await?;
        f.flush().await?;
        Ok(default_bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl RecordCache for FileRecordCache {
    async fn put(&mut self, key: String, record: MetricRecord) -> Result<(), Error> {
        self.records.put(key, record).await?;
        self.save().await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Option<MetricRecord> {
        self.records.get(key).await
    }
}

//! Normalized record caching.
//!
//! Normalizing a report is cheap but loading thousands of them per query is
//! not, and published RSSAC002 data is immutable once a day has passed. The
//! cache keeps successfully normalized records keyed by
//! `{rsi}/{metric}/{date}`.
//!
//! Two implementations are provided, [`memory::InMemoryRecordCache`] and
//! [`file::FileRecordCache`]. The former is not durable across restarts. The
//! latter writes its state to disk for each update and loads it again on
//! startup.

use crate::error::Error;
use crate::metrics::{MetricRecord, MetricType};
use crate::rsi::Rsi;
use std::sync::Arc;
use time::Date;
use tokio::sync::RwLock;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileRecordCache;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryRecordCache;

/// `DynRecordCache` is a type alias for a [`RecordCache`] that can be used
/// by multiple read/write consumers that coordinate through an [`Arc`] and a
/// [`RwLock`] wrapping the [`RecordCache`].
#[allow(clippy::module_name_repetitions)]
pub type DynRecordCache = Arc<RwLock<dyn RecordCache + Send + Sync>>;

/// The cache key for one operator/metric/day cell.
#[must_use]
pub fn cache_key(rsi: Rsi, metric: MetricType, date: Date) -> String {
    format!("{rsi}/{metric}/{date}")
}

/// An async trait describing storage of normalized metric records, keyed by
/// [`cache_key`].
#[async_trait::async_trait]
pub trait RecordCache {
    /// Store the record for the given key.
    async fn put(&mut self, key: String, record: MetricRecord) -> Result<(), Error>;

    /// Get the cached record for the given key (if any).
    async fn get(&self, key: &str) -> Option<MetricRecord>;
}

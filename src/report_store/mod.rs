//! Raw report retrieval.
//!
//! One RSSAC002 report is one YAML document published by one operator for
//! one metric on one day. The store hands back the raw text; parsing and
//! normalization happen in [`metrics`][crate::metrics].
//!
//! Two implementations are provided, [`file::FileReportStore`] and
//! [`memory::InMemoryReportStore`]. The former reads a local mirror of the
//! RSSAC002 data tree; the latter exists for tests.

use crate::error::Error;
use crate::metrics::MetricType;
use crate::rsi::Rsi;
use std::sync::Arc;
use time::Date;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileReportStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryReportStore;

/// `DynReportStore` is a type alias for a [`ReportStore`] shared across the
/// API handlers through an [`Arc`]. Retrieval is read-only, so no lock is
/// needed.
#[allow(clippy::module_name_repetitions)]
pub type DynReportStore = Arc<dyn ReportStore + Send + Sync>;

/// An async trait describing retrieval of raw RSSAC002 report documents,
/// keyed by operator, metric, and day.
#[async_trait::async_trait]
pub trait ReportStore {
    /// Fetch the raw YAML report text for the given operator, metric, and
    /// day. `Ok(None)` means no report was published for that combination.
    async fn raw_report(
        &self,
        rsi: Rsi,
        metric: MetricType,
        date: Date,
    ) -> Result<Option<String>, Error>;
}

//! Error types.

use crate::metrics::MetricType;
use axum::extract::rejection::QueryRejection;
use std::net::IpAddr;

/// Error enumerates the possible rootstat error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a `letters` expression violates the selection grammar.
    ///
    /// Deliberately carries no detail about which rule failed: callers only
    /// learn that the expression as a whole was rejected.
    #[error("invalid letters expression")]
    InvalidLetters,

    /// Returned when the metric segment of a
    /// [`/api/v1/{metric}` query][crate::api] names none of the six RSSAC002
    /// metrics.
    #[error("unknown metric \"{0}\"")]
    UnknownMetric(String),

    /// Returned when a query's `start_date`/`end_date` pair is unparseable,
    /// descending, or spans more days than
    /// [`Config::max_span_days`][`crate::config::Config::max_span_days`]
    /// allows. The specific cause is logged, not exposed.
    #[error("invalid date range")]
    BadDateRange,

    /// Returned when a raw report is not valid YAML at all. Distinct from
    /// [`Error::UnusableReport`] so the two degraded outcomes can be told
    /// apart in logs.
    #[error("report is not valid YAML")]
    UnparseableReport(#[from] serde_yaml::Error),

    /// Returned when a report parsed cleanly but lacks the top-level
    /// structure the named metric requires, so no record can be produced.
    #[error("report lacks the structure the {0} metric requires")]
    UnusableReport(MetricType),

    /// Returned when the query string of an API request can't be
    /// deserialized.
    #[error(transparent)]
    QueryExtractorRejection(#[from] QueryRejection),

    /// Returned when the [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`]
    /// is not a loopback address, or an address within a private network
    /// space. The rootstat HTTP API is intended to sit behind a reverse
    /// proxy or on a private network, never directly on a public interface.
    #[error("API bind address ({0}) must be a loopback or private IP")]
    InsecureAPIBind(IpAddr),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g.
    /// [loading a `Config`][crate::config::Config::try_from_file], or
    /// [loading a `FileRecordCache`][crate::cache::file::FileRecordCache::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when formatting a date for a report path fails.
    #[error("date formatting failed")]
    DateFormat(#[from] time::error::Format),
}

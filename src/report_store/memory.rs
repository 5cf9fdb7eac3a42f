use crate::error::Error;
use crate::metrics::MetricType;
use crate::report_store::ReportStore;
use crate::rsi::Rsi;
use std::collections::HashMap;
use time::Date;

/// An in-memory report store for tests: raw report texts keyed by operator,
/// metric, and day.
#[derive(Default, Debug, Clone)]
pub struct InMemoryReportStore {
    reports: HashMap<(Rsi, MetricType, Date), String>,
}

impl InMemoryReportStore {
    pub fn add_report(
        &mut self,
        rsi: Rsi,
        metric: MetricType,
        date: Date,
        raw: impl Into<String>,
    ) {
        self.reports.insert((rsi, metric, date), raw.into());
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn raw_report(
        &self,
        rsi: Rsi,
        metric: MetricType,
        date: Date,
    ) -> Result<Option<String>, Error> {
        Ok(self.reports.get(&(rsi, metric, date)).cloned())
    }
}

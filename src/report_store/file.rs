//! A disk-tree backed implementation of the [`ReportStore`][super::ReportStore]
//! trait.
//!
//! Reads from a local mirror of the published RSSAC002 data, laid out as
//! `{root}/{year}/{month}/{rsi}-root/{metric}-{yyyymmdd}.yaml`, e.g.
//! `2020/01/k-root/traffic-volume-20200115.yaml`.

use crate::error::Error;
use crate::metrics::MetricType;
use crate::report_store::ReportStore;
use crate::rsi::Rsi;
use lazy_static::lazy_static;
use std::io::ErrorKind;
use std::path::PathBuf;
use time::macros::format_description;
use time::Date;
use tokio::fs;

lazy_static! {
    static ref FILE_DATE_FORMATTER: &'static [time::format_description::FormatItem<'static>] =
        format_description!(version = 2, "[year][month][day]");
}

/// A read-only report store over a local RSSAC002 data mirror. A missing
/// file means the operator published nothing for that day.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileReportStore {
    root: String,
}

impl FileReportStore {
    #[must_use]
    pub fn new(root: String) -> Self {
        FileReportStore { root }
    }

    fn report_path(&self, rsi: Rsi, metric: MetricType, date: Date) -> Result<PathBuf, Error> {
        let yyyymmdd = date.format(&FILE_DATE_FORMATTER)?;
        Ok(PathBuf::from(&self.root)
            .join(date.year().to_string())
            .join(format!("{:02}", u8::from(date.month())))
            .join(format!("{rsi}-root"))
            .join(format!("{metric}-{yyyymmdd}.yaml")))
    }
}

#[async_trait::async_trait]
impl ReportStore for FileReportStore {
    async fn raw_report(
        &self,
        rsi: Rsi,
        metric: MetricType,
        date: Date,
    ) -> Result<Option<String>, Error> {
        let path = self.report_path(rsi, metric, date)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(Error::IO(err)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn report_paths_follow_the_mirror_layout() {
        let store = FileReportStore::new("/var/lib/rootstat/data".to_string());
        let path = store
            .report_path(Rsi::K, MetricType::TrafficVolume, date!(2020 - 01 - 15))
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/var/lib/rootstat/data/2020/01/k-root/traffic-volume-20200115.yaml")
        );
    }
}

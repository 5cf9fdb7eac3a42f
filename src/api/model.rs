use crate::metrics::MetricRecord;
use crate::rsi::Rsi;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::BTreeMap;
use time::macros::format_description;
use time::Date;

/// Query parameters accepted by the
/// [`/api/v1/{metric}` endpoint][crate::api].
#[derive(Deserialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct MetricQuery {
    pub letters: String,
    pub start_date: String,
    pub end_date: String,
}

/// The response body: one map per selected operator, keyed by ISO date, with
/// `null` for days without a usable report.
pub(super) type MetricSeries = BTreeMap<Rsi, BTreeMap<String, Option<MetricRecord>>>;

#[derive(thiserror::Error, Debug)]
pub enum DateRangeError {
    #[error("unparseable date: {0}")]
    Unparseable(#[from] time::error::Parse),
    #[error("start date {start} is after end date {end}")]
    Descending { start: Date, end: Date },
    #[error("range spans {days} days, limit is {max}")]
    SpanExceeded { days: i64, max: i64 },
}

lazy_static! {
    static ref DATE_FORMATTER: &'static [time::format_description::FormatItem<'static>] =
        format_description!(version = 2, "[year]-[month]-[day]");
}

impl MetricQuery {
    /// Validate the `start_date`/`end_date` pair into an inclusive range.
    pub fn date_range(&self, max_span_days: i64) -> Result<(Date, Date), DateRangeError> {
        let start = Date::parse(self.start_date.trim(), &DATE_FORMATTER)?;
        let end = Date::parse(self.end_date.trim(), &DATE_FORMATTER)?;
        if start > end {
            return Err(DateRangeError::Descending { start, end });
        }
        let days = (end - start).whole_days() + 1;
        if days > max_span_days {
            return Err(DateRangeError::SpanExceeded {
                days,
                max: max_span_days,
            });
        }
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn query(start_date: &str, end_date: &str) -> MetricQuery {
        MetricQuery {
            letters: "a".to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    #[test]
    fn accepts_single_day_and_multi_day_ranges() {
        assert_eq!(
            query("2020-01-15", "2020-01-15").date_range(366).unwrap(),
            (date!(2020 - 01 - 15), date!(2020 - 01 - 15))
        );
        assert_eq!(
            query(" 2020-01-15 ", "2020-02-15").date_range(366).unwrap(),
            (date!(2020 - 01 - 15), date!(2020 - 02 - 15))
        );
    }

    #[test]
    fn rejects_descending_ranges() {
        assert!(matches!(
            query("2020-02-15", "2020-01-15").date_range(366),
            Err(DateRangeError::Descending { .. })
        ));
    }

    #[test]
    fn rejects_ranges_over_the_span_limit() {
        assert!(matches!(
            query("2020-01-01", "2020-01-08").date_range(7),
            Err(DateRangeError::SpanExceeded { days: 8, max: 7 })
        ));
        assert!(query("2020-01-01", "2020-01-07").date_range(7).is_ok());
    }

    #[test]
    fn rejects_garbage_dates() {
        for (start_date, end_date) in [
            ("2020-1-15", "2020-01-16"),
            ("20200115", "20200116"),
            ("yesterday", "today"),
        ] {
            assert!(matches!(
                query(start_date, end_date).date_range(366),
                Err(DateRangeError::Unparseable(_))
            ));
        }
    }
}

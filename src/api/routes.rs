use crate::api::api_error::APIError;
use crate::api::model::{MetricQuery, MetricSeries};
use crate::api::server::AppState;
use crate::cache::cache_key;
use crate::error::Error;
use crate::metrics::{normalize_report, MetricRecord, MetricType};
use crate::rsi::{parse_rsi_expression, Rsi};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/api/v1/:metric", get(metric_series))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"ok":"healthy"}))
}

async fn metric_series(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<MetricQuery>, APIError>,
) -> Result<Json<MetricSeries>, APIError> {
    let metric: MetricType = metric.parse()?;
    let rsis = parse_rsi_expression(&query.letters)?;
    let (start, end) = match query.date_range(state.config.max_span_days) {
        Ok(range) => range,
        Err(err) => {
            tracing::debug!("rejected {metric} query: {err}");
            return Err(Error::BadDateRange.into());
        }
    };
    tracing::info!(
        "serving {metric} for {} operator(s), {start} through {end}",
        rsis.len()
    );
    Ok(Json(collect_series(&state, metric, &rsis, start, end).await?))
}

/// Assemble one response body cell by cell. A missing, unparseable, or
/// structurally unusable report becomes a `null` cell, never a request
/// failure.
async fn collect_series(
    state: &AppState,
    metric: MetricType,
    rsis: &BTreeSet<Rsi>,
    start: Date,
    end: Date,
) -> Result<MetricSeries, Error> {
    let mut series = MetricSeries::new();
    for &rsi in rsis {
        let mut days = BTreeMap::new();
        let mut date = start;
        loop {
            days.insert(date.to_string(), day_record(state, rsi, metric, date).await?);
            match date.next_day() {
                Some(next) if next <= end => date = next,
                _ => break,
            }
        }
        series.insert(rsi, days);
    }
    Ok(series)
}

async fn day_record(
    state: &AppState,
    rsi: Rsi,
    metric: MetricType,
    date: Date,
) -> Result<Option<MetricRecord>, Error> {
    let key = cache_key(rsi, metric, date);
    if let Some(record) = state.record_cache.read().await.get(&key).await {
        return Ok(Some(record));
    }

    let raw = match state.report_store.raw_report(rsi, metric, date).await? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match normalize_report(metric, &raw) {
        Ok(record) => {
            state
                .record_cache
                .write()
                .await
                .put(key, record.clone())
                .await?;
            Ok(Some(record))
        }
        Err(Error::UnparseableReport(err)) => {
            tracing::warn!("skipping unparseable {metric} report from {rsi} for {date}: {err}");
            Ok(None)
        }
        Err(Error::UnusableReport(_)) => {
            tracing::debug!("no usable {metric} data from {rsi} for {date}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

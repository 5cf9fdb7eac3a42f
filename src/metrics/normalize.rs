//! Normalization of raw RSSAC002 report documents.
//!
//! Each metric type has its own loosely-structured YAML shape in the wild.
//! Normalization maps one parsed document into the canonical record for its
//! metric, degrading gracefully: a missing or malformed field becomes an
//! explicit null, and only a document missing the mandatory top-level
//! structure for its metric fails outright.

use crate::error::Error;
use crate::metrics::record::{
    LoadTimeRecord, MetricRecord, MetricType, RcodeVolumeRecord, TrafficSizesRecord,
    TrafficVolumeRecord, UniqueSourcesRecord, ZoneSizeRecord,
};
use serde_json::Value;
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::BTreeMap;

/// The four `traffic-sizes` categories, in the order they are probed. Only
/// the first category present in a report is kept.
const SIZE_CATEGORIES: [&str; 4] = [
    "udp-request-sizes",
    "udp-response-sizes",
    "tcp-request-sizes",
    "tcp-response-sizes",
];

/// Normalize one raw report text for the given metric.
///
/// # Errors
///
/// Returns [`Error::UnparseableReport`] when the text is not valid YAML, and
/// [`Error::UnusableReport`] when it parsed but lacks the structure the
/// metric requires. A document that parses to something other than a mapping
/// is treated as an empty mapping.
pub fn normalize_report(metric: MetricType, raw: &str) -> Result<MetricRecord, Error> {
    let parsed: Yaml = serde_yaml::from_str(raw)?;
    let doc = parsed.as_mapping().cloned().unwrap_or_default();
    normalize(metric, &doc)
}

/// Normalize one parsed report document for the given metric.
///
/// Pure and side-effect free; the document is never mutated.
///
/// # Errors
///
/// Returns [`Error::UnusableReport`] when the document lacks the mandatory
/// top-level structure for the metric. The never-failing metrics
/// (`traffic-volume`, `rcode-volume`, `unique-sources`) instead produce a
/// record whose missing fields are explicit nulls.
pub fn normalize(metric: MetricType, doc: &Mapping) -> Result<MetricRecord, Error> {
    match metric {
        MetricType::LoadTime => match section(doc, "time") {
            Some(time) => Ok(MetricRecord::LoadTime(LoadTimeRecord { time })),
            None => Err(Error::UnusableReport(metric)),
        },
        MetricType::TrafficVolume => Ok(MetricRecord::TrafficVolume(TrafficVolumeRecord {
            dns_udp_queries_received_ipv4: scalar(doc, "dns-udp-queries-received-ipv4"),
            dns_udp_queries_received_ipv6: scalar(doc, "dns-udp-queries-received-ipv6"),
            dns_tcp_queries_received_ipv4: scalar(doc, "dns-tcp-queries-received-ipv4"),
            dns_tcp_queries_received_ipv6: scalar(doc, "dns-tcp-queries-received-ipv6"),
            dns_udp_responses_sent_ipv4: scalar(doc, "dns-udp-responses-sent-ipv4"),
            dns_udp_responses_sent_ipv6: scalar(doc, "dns-udp-responses-sent-ipv6"),
            dns_tcp_responses_sent_ipv4: scalar(doc, "dns-tcp-responses-sent-ipv4"),
            dns_tcp_responses_sent_ipv6: scalar(doc, "dns-tcp-responses-sent-ipv6"),
        })),
        MetricType::RcodeVolume => Ok(MetricRecord::RcodeVolume(RcodeVolumeRecord {
            rcode_volume: numeric_keys(doc),
        })),
        MetricType::TrafficSizes => normalize_traffic_sizes(doc),
        MetricType::UniqueSources => Ok(MetricRecord::UniqueSources(UniqueSourcesRecord {
            num_sources_ipv4: scalar(doc, "num-sources-ipv4"),
            num_sources_ipv6: scalar(doc, "num-sources-ipv6"),
            num_sources_ipv6_aggregate: scalar(doc, "num-sources-ipv6-aggregate"),
        })),
        MetricType::ZoneSize => match section(doc, "size") {
            Some(size) => Ok(MetricRecord::ZoneSize(ZoneSizeRecord { size })),
            None => Err(Error::UnusableReport(metric)),
        },
    }
}

fn normalize_traffic_sizes(doc: &Mapping) -> Result<MetricRecord, Error> {
    // TODO(XXX): a report carrying more than one populated category loses
    // all but the first probed; revisit if multi-category reports appear.
    let hit = SIZE_CATEGORIES
        .iter()
        .find_map(|category| section(doc, category).map(|sizes| (*category, sizes)));
    match hit {
        None => Err(Error::UnusableReport(MetricType::TrafficSizes)),
        Some((category, sizes)) => {
            let mut record = TrafficSizesRecord::default();
            match category {
                "udp-request-sizes" => record.udp_request_sizes = sizes,
                "udp-response-sizes" => record.udp_response_sizes = sizes,
                "tcp-request-sizes" => record.tcp_request_sizes = sizes,
                _ => record.tcp_response_sizes = sizes,
            }
            Ok(MetricRecord::TrafficSizes(record))
        }
    }
}

/// The pairs under `key`, iff it holds a non-empty nested mapping.
fn section(doc: &Mapping, key: &str) -> Option<BTreeMap<String, Value>> {
    match doc.get(key) {
        Some(Yaml::Mapping(section)) if !section.is_empty() => Some(
            section
                .iter()
                .filter_map(|(k, v)| Some((mapping_key(k)?, json_value(v))))
                .collect(),
        ),
        _ => None,
    }
}

/// The scalar at `key`, treating a missing key, an empty string, a null, and
/// any nested structure all as absent.
fn scalar(doc: &Mapping, key: &str) -> Option<Value> {
    match doc.get(key)? {
        Yaml::String(s) if s.is_empty() => None,
        value @ (Yaml::String(_) | Yaml::Number(_) | Yaml::Bool(_)) => Some(json_value(value)),
        _ => None,
    }
}

/// The top-level pairs whose keys parse as numeric. RSSAC002 rcode reports
/// mix RCODE counts (numeric keys) with other bookkeeping entries.
fn numeric_keys(doc: &Mapping) -> BTreeMap<String, Value> {
    doc.iter()
        .filter_map(|(k, v)| {
            let key = mapping_key(k)?;
            if key.parse::<f64>().is_ok() {
                Some((key, json_value(v)))
            } else {
                None
            }
        })
        .collect()
}

/// String form of a YAML mapping key. YAML permits non-string keys and
/// RSSAC002 rcode reports use bare integers; structured keys have no string
/// form and are dropped.
fn mapping_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Verbatim conversion of a YAML value into the JSON model records carry.
fn json_value(value: &Yaml) -> Value {
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::from)
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(seq) => Value::Array(seq.iter().map(json_value).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .iter()
                .filter_map(|(k, v)| Some((mapping_key(k)?, json_value(v))))
                .collect(),
        ),
        Yaml::Tagged(tagged) => json_value(&tagged.value),
    }
}

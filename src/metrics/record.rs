use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The six RSSAC002 metric categories. Closed at compile time so the
/// normalizer dispatch is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricType {
    LoadTime,
    TrafficVolume,
    RcodeVolume,
    TrafficSizes,
    UniqueSources,
    ZoneSize,
}

impl MetricType {
    /// Every metric, in the order RSSAC002 lists them.
    pub const ALL: [MetricType; 6] = [
        MetricType::LoadTime,
        MetricType::TrafficVolume,
        MetricType::RcodeVolume,
        MetricType::TrafficSizes,
        MetricType::UniqueSources,
        MetricType::ZoneSize,
    ];

    /// The kebab-case name used in report file names and API paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::LoadTime => "load-time",
            MetricType::TrafficVolume => "traffic-volume",
            MetricType::RcodeVolume => "rcode-volume",
            MetricType::TrafficSizes => "traffic-sizes",
            MetricType::UniqueSources => "unique-sources",
            MetricType::ZoneSize => "zone-size",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load-time" => Ok(MetricType::LoadTime),
            "traffic-volume" => Ok(MetricType::TrafficVolume),
            "rcode-volume" => Ok(MetricType::RcodeVolume),
            "traffic-sizes" => Ok(MetricType::TrafficSizes),
            "unique-sources" => Ok(MetricType::UniqueSources),
            "zone-size" => Ok(MetricType::ZoneSize),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

/// One normalized report: a tagged sum over the six metric shapes.
///
/// The `metric` tag makes cached records self-describing, which matters for
/// the two shapes whose fields are all optional and would otherwise be
/// indistinguishable when every field is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "kebab-case")]
pub enum MetricRecord {
    LoadTime(LoadTimeRecord),
    TrafficVolume(TrafficVolumeRecord),
    RcodeVolume(RcodeVolumeRecord),
    TrafficSizes(TrafficSizesRecord),
    UniqueSources(UniqueSourcesRecord),
    ZoneSize(ZoneSizeRecord),
}

/// Per-instance zone load times, copied verbatim from the report's `time`
/// section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadTimeRecord {
    pub time: BTreeMap<String, Value>,
}

/// Daily query and response counts, each independently absent when the
/// operator did not report it (or reported it empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficVolumeRecord {
    #[serde(rename = "dns-udp-queries-received-ipv4")]
    pub dns_udp_queries_received_ipv4: Option<Value>,
    #[serde(rename = "dns-udp-queries-received-ipv6")]
    pub dns_udp_queries_received_ipv6: Option<Value>,
    #[serde(rename = "dns-tcp-queries-received-ipv4")]
    pub dns_tcp_queries_received_ipv4: Option<Value>,
    #[serde(rename = "dns-tcp-queries-received-ipv6")]
    pub dns_tcp_queries_received_ipv6: Option<Value>,
    #[serde(rename = "dns-udp-responses-sent-ipv4")]
    pub dns_udp_responses_sent_ipv4: Option<Value>,
    #[serde(rename = "dns-udp-responses-sent-ipv6")]
    pub dns_udp_responses_sent_ipv6: Option<Value>,
    #[serde(rename = "dns-tcp-responses-sent-ipv4")]
    pub dns_tcp_responses_sent_ipv4: Option<Value>,
    #[serde(rename = "dns-tcp-responses-sent-ipv6")]
    pub dns_tcp_responses_sent_ipv6: Option<Value>,
}

/// Response counts by RCODE: only the numerically-keyed entries of the
/// report survive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RcodeVolumeRecord {
    #[serde(rename = "rcode-volume")]
    pub rcode_volume: BTreeMap<String, Value>,
}

/// Message size histograms. Exactly one category is populated per record;
/// the others are emitted empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficSizesRecord {
    #[serde(rename = "udp-request-sizes")]
    pub udp_request_sizes: BTreeMap<String, Value>,
    #[serde(rename = "udp-response-sizes")]
    pub udp_response_sizes: BTreeMap<String, Value>,
    #[serde(rename = "tcp-request-sizes")]
    pub tcp_request_sizes: BTreeMap<String, Value>,
    #[serde(rename = "tcp-response-sizes")]
    pub tcp_response_sizes: BTreeMap<String, Value>,
}

/// Unique source counts, each independently absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueSourcesRecord {
    #[serde(rename = "num-sources-ipv4")]
    pub num_sources_ipv4: Option<Value>,
    #[serde(rename = "num-sources-ipv6")]
    pub num_sources_ipv6: Option<Value>,
    #[serde(rename = "num-sources-ipv6-aggregate")]
    pub num_sources_ipv6_aggregate: Option<Value>,
}

/// Zone sizes, copied verbatim from the report's `size` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSizeRecord {
    pub size: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip() {
        for metric in MetricType::ALL {
            assert_eq!(metric.as_str().parse::<MetricType>().unwrap(), metric);
        }
    }

    #[test]
    fn unknown_metric_is_rejected() {
        assert!("load_time".parse::<MetricType>().is_err());
        assert!("".parse::<MetricType>().is_err());
    }

    #[test]
    fn all_null_shapes_stay_distinguishable_through_json() {
        let sources = MetricRecord::UniqueSources(UniqueSourcesRecord::default());
        let volume = MetricRecord::TrafficVolume(TrafficVolumeRecord::default());
        for record in [sources, volume] {
            let encoded = serde_json::to_string(&record).unwrap();
            let decoded: MetricRecord = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, record);
        }
    }

    #[test]
    fn absent_fields_serialize_as_explicit_nulls() {
        let record = MetricRecord::UniqueSources(UniqueSourcesRecord {
            num_sources_ipv4: Some(Value::from(12)),
            ..UniqueSourcesRecord::default()
        });
        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded["num-sources-ipv4"], Value::from(12));
        assert!(encoded["num-sources-ipv6"].is_null());
        assert!(encoded["num-sources-ipv6-aggregate"].is_null());
    }
}

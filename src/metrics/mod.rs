//! RSSAC002 metric types, canonical records, and normalization.
//!
//! Root server operators publish one YAML document per metric per day. The
//! documents are loosely structured and vary by metric; this module turns
//! them into one strongly-typed [`MetricRecord`] shape per [`MetricType`],
//! with absent data carried as explicit nulls rather than missing keys.

mod normalize;
mod record;

pub use normalize::{normalize, normalize_report};
pub use record::{
    LoadTimeRecord, MetricRecord, MetricType, RcodeVolumeRecord, TrafficSizesRecord,
    TrafficVolumeRecord, UniqueSourcesRecord, ZoneSizeRecord,
};

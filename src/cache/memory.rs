use crate::cache::RecordCache;
use crate::error::Error;
use crate::metrics::MetricRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An in-memory record cache, not durable across restarts.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryRecordCache {
    records: HashMap<String, MetricRecord>,
}

#[async_trait::async_trait]
impl RecordCache for InMemoryRecordCache {
    async fn put(&mut self, key: String, record: MetricRecord) -> Result<(), Error> {
        self.records.insert(key, record);
        Ok(())
    }

    async fn get(&self, key: &str) -> Option<MetricRecord> {
        self.records.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricType, ZoneSizeRecord};
    use crate::rsi::Rsi;
    use serde_json::Value;
    use time::macros::date;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let mut cache = InMemoryRecordCache::default();
        let key = crate::cache::cache_key(Rsi::A, MetricType::ZoneSize, date!(2020 - 01 - 15));
        let record = MetricRecord::ZoneSize(ZoneSizeRecord {
            size: [("root".to_string(), Value::from(2_140_157))]
                .into_iter()
                .collect(),
        });
        cache.put(key.clone(), record.clone()).await.unwrap();
        assert_eq!(cache.get(&key).await, Some(record));
        assert_eq!(cache.get("b/zone-size/2020-01-15").await, None);
    }
}

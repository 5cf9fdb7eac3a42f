use crate::cache::{DynRecordCache, FileRecordCache, InMemoryRecordCache};
use crate::error::Error;
use crate::report_store::{DynReportStore, FileReportStore};
use ipnetwork::IpNetwork;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Root of the local RSSAC002 data mirror the
    /// [`FileReportStore`] reads from.
    pub data_root: String,
    /// Where the record cache persists its JSON state. When unset the cache
    /// is memory-only and cold on every start.
    pub cache_state_path: Option<String>,
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// Upper bound on the number of days one query may span.
    #[serde(default = "default_max_span_days")]
    pub max_span_days: i64,
}

fn default_max_span_days() -> i64 {
    366
}

lazy_static! {
    // NOTE(XXX): Once the "ip" feature has stabilized we can use Ipv6Addr.is_unique_local[0].
    //            Presently this feature is unstable so we home-roll. See also RFC 4193[1].
    // [0]: https://doc.rust-lang.org/std/net/struct.Ipv6Addr.html#method.is_unique_local
    // [1]: https://www.rfc-editor.org/rfc/rfc4193.html
    static ref IPV6_UNIQUE_LOCAL_NETWORK: IpNetwork = IpNetwork::from_str("fc00::/7").unwrap();
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] or [`Error::InvalidJSON`] when the file can't
    /// be read or parsed, and [`Error::InsecureAPIBind`] when the configured
    /// API bind address is neither loopback nor private.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.bind_addr_is_secure()?;
        Ok(conf)
    }

    /// The report store reading from [`Config::data_root`].
    #[must_use]
    pub fn report_store(&self) -> DynReportStore {
        Arc::new(FileReportStore::new(self.data_root.clone()))
    }

    /// The record cache: file-backed when [`Config::cache_state_path`] is
    /// set, memory-only otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] or [`Error::InvalidJSON`] when an existing
    /// cache state file can't be loaded.
    pub async fn record_cache(&self) -> Result<DynRecordCache, Error> {
        Ok(match &self.cache_state_path {
            Some(path) => Arc::new(RwLock::new(FileRecordCache::try_from_file(path).await?)),
            None => Arc::new(RwLock::new(InMemoryRecordCache::default())),
        })
    }

    fn bind_addr_is_secure(&self) -> Result<(), Error> {
        match self.api_bind_addr {
            SocketAddr::V4(v4_addr) => {
                let ip = v4_addr.ip();
                if !ip.is_loopback() && !ip.is_private() {
                    return Err(Error::InsecureAPIBind(IpAddr::V4(*ip)));
                }
                Ok(())
            }
            SocketAddr::V6(v6_addr) => {
                let ip = v6_addr.ip();
                if !ip.is_loopback() && !IPV6_UNIQUE_LOCAL_NETWORK.contains(IpAddr::V6(*ip)) {
                    return Err(Error::InsecureAPIBind(IpAddr::V6(*ip)));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bind: &str) -> Config {
        Config {
            data_root: "/var/lib/rootstat/data".to_string(),
            cache_state_path: None,
            api_bind_addr: bind.parse().unwrap(),
            api_timeout: Duration::from_secs(5),
            max_span_days: default_max_span_days(),
        }
    }

    #[test]
    fn loopback_and_private_binds_are_accepted() {
        for bind in ["127.0.0.1:3000", "10.0.0.7:3000", "[::1]:3000"] {
            assert!(config(bind).bind_addr_is_secure().is_ok(), "{bind}");
        }
    }

    #[test]
    fn public_binds_are_rejected() {
        for bind in ["198.51.100.4:3000", "[2001:db8::1]:3000"] {
            assert!(matches!(
                config(bind).bind_addr_is_secure(),
                Err(Error::InsecureAPIBind(_))
            ));
        }
    }
}

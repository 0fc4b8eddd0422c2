use super::vbmap::VbEntry;
use crate::core::{ClusterFeature, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Point-in-time view of the whole cluster topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub rev: u64,
    pub cluster_id: String,
    pub num_vbuckets: u32,
    pub replica_latency_ms: u64,
    pub features: Vec<ClusterFeature>,
    pub nodes: Vec<NodeSnapshot>,
    pub buckets: Vec<BucketSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSnapshot {
    pub name: String,
    pub num_replicas: u32,
    pub vbucket_map: Vec<VbEntry>,
}

impl TopologySnapshot {
    pub fn bucket(&self, name: &str) -> Option<&BucketSnapshot> {
        self.buckets.iter().find(|b| b.name == name)
    }
}

/// Turns a topology snapshot into the config blob handed to consumers.
pub trait ConfigBuilder: Send + Sync + fmt::Debug {
    fn build(&self, topology: &TopologySnapshot) -> Result<Vec<u8>>;
}

/// Encodes the snapshot as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigBuilder {
    pretty: bool,
}

impl JsonConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ConfigBuilder for JsonConfigBuilder {
    fn build(&self, topology: &TopologySnapshot) -> Result<Vec<u8>> {
        let blob = if self.pretty {
            serde_json::to_vec_pretty(topology)?
        } else {
            serde_json::to_vec(topology)?
        };
        Ok(blob)
    }
}

/// Cached config blob, tagged with the topology revision it was built from.
#[derive(Debug, Default)]
pub(crate) enum CachedConfig {
    #[default]
    Invalid,
    Valid { revision: u64, blob: Arc<[u8]> },
}

impl CachedConfig {
    /// The cached blob, if it was built at `revision`.
    pub(crate) fn current(&self, revision: u64) -> Option<Arc<[u8]>> {
        match self {
            CachedConfig::Valid {
                revision: built_at,
                blob,
            } if *built_at == revision => Some(Arc::clone(blob)),
            _ => None,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        *self = CachedConfig::Invalid;
    }

    pub(crate) fn is_valid(&self) -> bool {
        matches!(self, CachedConfig::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_config_tracks_revision() {
        let mut cache = CachedConfig::default();
        assert!(cache.current(0).is_none());

        cache = CachedConfig::Valid {
            revision: 3,
            blob: Arc::from(b"cfg".to_vec()),
        };
        assert_eq!(cache.current(3).as_deref(), Some(&b"cfg"[..]));
        assert!(cache.current(4).is_none());

        cache.invalidate();
        assert!(!cache.is_valid());
        assert!(cache.current(3).is_none());
    }
}

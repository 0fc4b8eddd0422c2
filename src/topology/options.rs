use super::config::ConfigBuilder;
use crate::clock::VirtualClock;
use crate::core::{ClusterError, ClusterFeature, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_NUM_VBUCKETS: u32 = 1024;
pub const DEFAULT_REPLICA_LATENCY: Duration = Duration::from_millis(50);
pub const DEFAULT_NODE_HOSTNAME: &str = "127.0.0.1";
pub const DEFAULT_NUM_REPLICAS: u32 = 1;
pub const MAX_NUM_REPLICAS: u32 = 3;

/// Options for creating a cluster.
///
/// Zero values mean "use the default": `num_vbuckets` falls back to
/// [`DEFAULT_NUM_VBUCKETS`] and `replica_latency` to
/// [`DEFAULT_REPLICA_LATENCY`]. A missing clock gets a fresh
/// [`VirtualClock`], a missing config builder the JSON one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    pub enabled_features: Vec<ClusterFeature>,

    pub num_vbuckets: u32,

    #[serde(rename = "replica_latency_ms", with = "duration_ms")]
    pub replica_latency: Duration,

    pub initial_node: NewNodeOptions,

    #[serde(skip)]
    pub clock: Option<VirtualClock>,

    #[serde(skip)]
    pub config_builder: Option<Arc<dyn ConfigBuilder>>,
}

impl ClusterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClusterError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn feature(mut self, feature: impl Into<ClusterFeature>) -> Self {
        self.enabled_features.push(feature.into());
        self
    }

    pub fn num_vbuckets(mut self, num_vbuckets: u32) -> Self {
        self.num_vbuckets = num_vbuckets;
        self
    }

    pub fn replica_latency(mut self, latency: Duration) -> Self {
        self.replica_latency = latency;
        self
    }

    pub fn initial_node(mut self, node: NewNodeOptions) -> Self {
        self.initial_node = node;
        self
    }

    pub fn clock(mut self, clock: VirtualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config_builder(mut self, builder: Arc<dyn ConfigBuilder>) -> Self {
        self.config_builder = Some(builder);
        self
    }
}

/// Options for a node joining the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewNodeOptions {
    /// Explicit node identity. A random UUID is assigned when absent.
    pub id: Option<String>,

    pub hostname: String,
}

impl Default for NewNodeOptions {
    fn default() -> Self {
        Self {
            id: None,
            hostname: DEFAULT_NODE_HOSTNAME.to_string(),
        }
    }
}

impl NewNodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node options with a fixed identity.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::default().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }
}

/// Options for a bucket created on the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBucketOptions {
    pub name: String,

    /// Requested replicas per vbucket, capped by the node count at map time.
    pub num_replicas: u32,
}

impl Default for NewBucketOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            num_replicas: DEFAULT_NUM_REPLICAS,
        }
    }
}

impl NewBucketOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn num_replicas(mut self, num_replicas: u32) -> Self {
        self.num_replicas = num_replicas;
        self
    }
}

/// Serializes a `Duration` as whole milliseconds.
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

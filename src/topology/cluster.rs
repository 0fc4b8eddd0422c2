use super::arena::MemberArena;
use super::bucket::Bucket;
use super::config::{
    BucketSnapshot, CachedConfig, ConfigBuilder, JsonConfigBuilder, NodeSnapshot, TopologySnapshot,
};
use super::handle::ClusterHandle;
use super::node::Node;
use super::options::{
    ClusterOptions, DEFAULT_NUM_VBUCKETS, DEFAULT_REPLICA_LATENCY, NewBucketOptions,
    NewNodeOptions,
};
use super::vbmap::VbMap;
use crate::clock::VirtualClock;
use crate::core::{ClusterError, ClusterFeature, Result};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;
use tracing::{Level, event, info_span};
use uuid::Uuid;

/// Nodes and buckets in join/creation order.
#[derive(Debug)]
struct Topology {
    nodes: MemberArena<Node>,
    buckets: MemberArena<Bucket>,
}

impl Topology {
    fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id().to_string()).collect()
    }
}

/// A simulated cluster: the arbitration point for every topology change.
///
/// Mutations serialize on the cluster's mutation lock; reads share the
/// topology lock and never observe a half-applied change. The config blob
/// is rebuilt lazily after each mutation.
pub struct Cluster {
    handle: Arc<ClusterHandle>,
    topology: RwLock<Topology>,
    config: Mutex<CachedConfig>,
    config_builder: Arc<dyn ConfigBuilder>,
}

impl std::fmt::Debug for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cluster")
            .field("id", &self.handle.id())
            .field("revision", &self.handle.revision())
            .field("config_builder", &self.config_builder)
            .finish()
    }
}

// Cluster logic is split by concern to keep topology handling navigable.
include!("cluster/construct.rs");
include!("cluster/mutations.rs");
include!("cluster/lookups.rs");

use crate::clock::VirtualClock;
use crate::core::{ClusterError, ClusterFeature, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

/// Cluster-wide facts shared with every node and bucket.
///
/// Everything here is fixed at cluster creation except the topology
/// revision, the member id set and the mutation lock. Nodes and buckets hold this through an
/// `Arc`; it never points back at the cluster's collections.
#[derive(Debug)]
pub struct ClusterHandle {
    id: String,
    enabled_features: Vec<ClusterFeature>,
    num_vbuckets: u32,
    replica_latency: Duration,
    clock: VirtualClock,
    revision: AtomicU64,
    members: RwLock<HashSet<String>>,
    mutation: Mutex<()>,
}

impl ClusterHandle {
    pub(crate) fn new(
        id: String,
        enabled_features: Vec<ClusterFeature>,
        num_vbuckets: u32,
        replica_latency: Duration,
        clock: VirtualClock,
    ) -> Self {
        let mut features = Vec::with_capacity(enabled_features.len());
        for feature in enabled_features {
            if !features.contains(&feature) {
                features.push(feature);
            }
        }

        Self {
            id,
            enabled_features: features,
            num_vbuckets,
            replica_latency,
            clock,
            revision: AtomicU64::new(0),
            members: RwLock::new(HashSet::new()),
            mutation: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn enabled_features(&self) -> &[ClusterFeature] {
        &self.enabled_features
    }

    pub fn is_feature_enabled(&self, feature: &ClusterFeature) -> bool {
        self.enabled_features.contains(feature)
    }

    pub fn num_vbuckets(&self) -> u32 {
        self.num_vbuckets
    }

    pub fn replica_latency(&self) -> Duration {
        self.replica_latency
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// Monotonic counter bumped by every topology mutation.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub(crate) fn bump_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Serializes topology mutations across the cluster and its buckets.
    pub(crate) fn lock_mutations(&self) -> Result<MutexGuard<'_, ()>> {
        Ok(self.mutation.lock()?)
    }

    pub fn is_member(&self, node_id: &str) -> bool {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(node_id)
    }

    /// Fails with `InvalidVbMap` naming the first id that has not joined.
    pub(crate) fn ensure_members(&self, node_ids: &[String]) -> Result<()> {
        let members = self.members.read().unwrap_or_else(PoisonError::into_inner);
        match node_ids.iter().find(|id| !members.contains(id.as_str())) {
            Some(stranger) => Err(ClusterError::InvalidVbMap(format!(
                "node '{}' is not a member of cluster '{}'",
                stranger, self.id
            ))),
            None => Ok(()),
        }
    }

    /// Called with the mutation lock held, as the node is published.
    pub(crate) fn record_member(&self, node_id: &str) {
        self.members
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(node_id.to_string());
    }
}

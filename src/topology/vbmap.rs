use crate::core::{ClusterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ownership of a single vbucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VbEntry {
    pub primary: String,
    #[serde(default)]
    pub replicas: Vec<String>,
}

impl VbEntry {
    /// Primary first, then replicas in order.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.replicas.iter().map(String::as_str))
    }
}

/// Maps every vbucket of a bucket to a primary node and its replicas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VbMap {
    entries: Vec<VbEntry>,
}

impl VbMap {
    /// Computes ownership for `num_vbuckets` partitions over `node_ids`.
    ///
    /// Primaries are dealt round-robin in the given node order, so vbucket
    /// `vb` is owned by `node_ids[vb % n]`. Replica `r` of that vbucket goes
    /// to `node_ids[(vb + 1 + r) % n]`, which never repeats the primary or
    /// another replica. The replica count is capped at `n - 1`.
    ///
    /// The same ordered input always yields the same map.
    pub fn compute(num_vbuckets: u32, num_replicas: u32, node_ids: &[String]) -> Result<Self> {
        if node_ids.is_empty() {
            return Err(ClusterError::InvalidVbMap(
                "at least one node is required".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(node_ids.len());
        for node_id in node_ids {
            if node_id.trim().is_empty() {
                return Err(ClusterError::InvalidVbMap(
                    "node id must not be empty".to_string(),
                ));
            }
            if !seen.insert(node_id.as_str()) {
                return Err(ClusterError::InvalidVbMap(format!(
                    "node '{}' appears more than once",
                    node_id
                )));
            }
        }

        let node_count = node_ids.len();
        let replica_count = (num_replicas as usize).min(node_count - 1);

        let entries = (0..num_vbuckets as usize)
            .map(|vb| VbEntry {
                primary: node_ids[vb % node_count].clone(),
                replicas: (0..replica_count)
                    .map(|r| node_ids[(vb + 1 + r) % node_count].clone())
                    .collect(),
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VbEntry] {
        &self.entries
    }

    pub fn entry(&self, vb: u32) -> Option<&VbEntry> {
        self.entries.get(vb as usize)
    }

    pub fn primary_for(&self, vb: u32) -> Option<&str> {
        self.entry(vb).map(|entry| entry.primary.as_str())
    }

    pub fn replicas_for(&self, vb: u32) -> &[String] {
        self.entry(vb)
            .map(|entry| entry.replicas.as_slice())
            .unwrap_or_default()
    }

    /// Vbuckets whose primary is `node_id`, in ascending order.
    pub fn partitions_owned_by(&self, node_id: &str) -> Vec<u32> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.primary == node_id)
            .map(|(vb, _)| vb as u32)
            .collect()
    }

    /// Vbuckets where `node_id` holds a replica copy.
    pub fn replica_partitions_of(&self, node_id: &str) -> Vec<u32> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.replicas.iter().any(|r| r == node_id))
            .map(|(vb, _)| vb as u32)
            .collect()
    }

    /// Every node id this map references.
    pub fn referenced_nodes(&self) -> HashSet<&str> {
        self.entries.iter().flat_map(VbEntry::owners).collect()
    }
}

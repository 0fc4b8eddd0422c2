use super::handle::ClusterHandle;
use super::options::{MAX_NUM_REPLICAS, NewBucketOptions};
use super::vbmap::VbMap;
use crate::core::{ClusterError, Result};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

const MAX_BUCKET_NAME_LEN: usize = 100;

/// A named data container and its vbucket ownership map.
#[derive(Debug)]
pub struct Bucket {
    name: String,
    num_replicas: u32,
    cluster: Arc<ClusterHandle>,
    vb_map: RwLock<Arc<VbMap>>,
}

impl Bucket {
    /// Validates options and builds a bucket with an empty map. The cluster
    /// fills the map before the bucket becomes visible.
    pub(crate) fn new(cluster: Arc<ClusterHandle>, options: NewBucketOptions) -> Result<Self> {
        validate_bucket_name(&options.name)?;
        if options.num_replicas > MAX_NUM_REPLICAS {
            return Err(ClusterError::InvalidBucketOptions(format!(
                "bucket '{}' requests {} replicas, at most {} are supported",
                options.name, options.num_replicas, MAX_NUM_REPLICAS
            )));
        }

        Ok(Self {
            name: options.name,
            num_replicas: options.num_replicas,
            cluster,
            vb_map: RwLock::new(Arc::new(VbMap::default())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured replica count; the effective count in the map may be lower.
    pub fn num_replicas(&self) -> u32 {
        self.num_replicas
    }

    pub fn cluster(&self) -> &ClusterHandle {
        &self.cluster
    }

    /// Current vbucket map. The returned map is never mutated; rebuilds
    /// publish a new one.
    pub fn vb_map(&self) -> Arc<VbMap> {
        // Only ever held across a pointer swap, so a poisoned value is intact.
        let guard = self.vb_map.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Recomputes the vbucket map for the given ordered node ids.
    ///
    /// Every id must belong to a node that has joined the cluster. Runs
    /// under the cluster's mutation lock and bumps the topology revision, so
    /// a later config request reflects the new map.
    pub fn update_vb_map(&self, node_ids: &[String]) -> Result<()> {
        let _mutation = self.cluster.lock_mutations()?;
        self.cluster.ensure_members(node_ids)?;
        let map = self.compute_vb_map(node_ids)?;
        self.publish_vb_map(map);
        self.cluster.bump_revision();
        Ok(())
    }

    pub(crate) fn compute_vb_map(&self, node_ids: &[String]) -> Result<VbMap> {
        VbMap::compute(self.cluster.num_vbuckets(), self.num_replicas, node_ids)
    }

    pub(crate) fn publish_vb_map(&self, map: VbMap) {
        debug!(
            "Bucket '{}' vbucket map rebuilt: {} vbuckets, {} replicas",
            self.name,
            map.len(),
            map.entries().first().map(|e| e.replicas.len()).unwrap_or(0)
        );
        let mut guard = self.vb_map.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(map);
    }
}

/// Bucket names are 1..=100 characters of `[A-Za-z0-9_.%-]`.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ClusterError::InvalidBucketOptions(
            "bucket name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_BUCKET_NAME_LEN {
        return Err(ClusterError::InvalidBucketOptions(format!(
            "bucket name is {} characters, at most {} are allowed",
            name.len(),
            MAX_BUCKET_NAME_LEN
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%' | '-')))
    {
        return Err(ClusterError::InvalidBucketOptions(format!(
            "bucket name '{}' contains invalid character '{}'",
            name, bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(validate_bucket_name("default").is_ok());
        assert!(validate_bucket_name("travel-sample").is_ok());
        assert!(validate_bucket_name("beer_sample.v2").is_ok());
        assert!(validate_bucket_name("100%").is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert!(validate_bucket_name("").is_err());
        assert!(validate_bucket_name("has space").is_err());
        assert!(validate_bucket_name("slash/name").is_err());
        assert!(validate_bucket_name(&"a".repeat(101)).is_err());
        assert!(validate_bucket_name(&"a".repeat(100)).is_ok());
    }
}

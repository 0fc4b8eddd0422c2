impl Cluster {
    pub fn id(&self) -> &str {
        self.handle.id()
    }

    /// Shared cluster facts, as seen by nodes and buckets.
    pub fn handle(&self) -> &Arc<ClusterHandle> {
        &self.handle
    }

    pub fn is_feature_enabled(&self, feature: impl Into<ClusterFeature>) -> bool {
        self.handle.is_feature_enabled(&feature.into())
    }

    pub fn enabled_features(&self) -> &[ClusterFeature] {
        self.handle.enabled_features()
    }

    pub fn num_vbuckets(&self) -> u32 {
        self.handle.num_vbuckets()
    }

    pub fn replica_latency(&self) -> Duration {
        self.handle.replica_latency()
    }

    pub fn clock(&self) -> &VirtualClock {
        self.handle.clock()
    }

    /// Readers keep serving the last published topology if a writer panicked.
    fn read_topology(&self) -> RwLockReadGuard<'_, Topology> {
        self.topology.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Node ids in join order.
    pub fn node_ids(&self) -> Vec<String> {
        self.read_topology().node_ids()
    }

    pub fn nodes(&self) -> Vec<Arc<Node>> {
        self.read_topology().nodes.iter().cloned().collect()
    }

    pub fn node(&self, id: &str) -> Option<Arc<Node>> {
        self.read_topology().nodes.get(id).cloned()
    }

    /// Node at a join position; the initial node is slot 0.
    pub fn node_at(&self, slot: usize) -> Option<Arc<Node>> {
        self.read_topology().nodes.slot(slot).cloned()
    }

    pub fn node_count(&self) -> usize {
        self.read_topology().nodes.len()
    }

    /// Looks a bucket up by name. With duplicate names the bucket created
    /// first wins.
    pub fn get_bucket(&self, name: &str) -> Option<Arc<Bucket>> {
        self.read_topology().buckets.get(name).cloned()
    }

    pub fn buckets(&self) -> Vec<Arc<Bucket>> {
        self.read_topology().buckets.iter().cloned().collect()
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.read_topology()
            .buckets
            .iter()
            .map(|b| b.name().to_string())
            .collect()
    }

    pub fn bucket_count(&self) -> usize {
        self.read_topology().buckets.len()
    }

    /// Topology revision; bumped by every mutation.
    pub fn config_revision(&self) -> u64 {
        self.handle.revision()
    }

    /// Structured snapshot of the current topology.
    pub fn topology(&self) -> TopologySnapshot {
        let topology = self.read_topology();
        // Read before the maps so the tag never runs ahead of the content.
        let rev = self.handle.revision();

        TopologySnapshot {
            rev,
            cluster_id: self.handle.id().to_string(),
            num_vbuckets: self.handle.num_vbuckets(),
            replica_latency_ms: u64::try_from(self.handle.replica_latency().as_millis())
                .unwrap_or(u64::MAX),
            features: self.handle.enabled_features().to_vec(),
            nodes: topology
                .nodes
                .iter()
                .map(|node| NodeSnapshot {
                    id: node.id().to_string(),
                    hostname: node.hostname().to_string(),
                })
                .collect(),
            buckets: topology
                .buckets
                .iter()
                .map(|bucket| BucketSnapshot {
                    name: bucket.name().to_string(),
                    num_replicas: bucket.num_replicas(),
                    vbucket_map: bucket.vb_map().entries().to_vec(),
                })
                .collect(),
        }
    }

    /// The config blob for the current topology.
    ///
    /// Served from cache while no mutation has happened since it was built;
    /// otherwise rebuilt once, with concurrent callers waiting on the rebuild.
    pub fn config(&self) -> Result<Arc<[u8]>> {
        let mut cache = self.lock_config();
        if let Some(blob) = cache.current(self.handle.revision()) {
            return Ok(blob);
        }

        let topology = self.topology();
        let blob: Arc<[u8]> = Arc::from(self.config_builder.build(&topology)?);
        debug!(
            "Cluster '{}' config rebuilt at revision {} ({} bytes)",
            topology.cluster_id,
            topology.rev,
            blob.len()
        );
        *cache = CachedConfig::Valid {
            revision: topology.rev,
            blob: Arc::clone(&blob),
        };
        Ok(blob)
    }

    /// True while a built config is cached.
    pub fn has_cached_config(&self) -> bool {
        self.lock_config().is_valid()
    }

    /// Written only after a successful build, so a poisoned value is intact.
    fn lock_config(&self) -> MutexGuard<'_, CachedConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Cluster {
    /// Joins a new node and rebalances every bucket over the new node list.
    ///
    /// On failure nothing is appended, no bucket map changes and the cached
    /// config stays as it was.
    pub fn add_node(&self, options: NewNodeOptions) -> Result<Arc<Node>> {
        let span = info_span!("cluster.add_node", cluster_id = %self.handle.id());
        let _enter = span.enter();

        let _mutation = self.handle.lock_mutations()?;
        let node = match Node::new(Arc::clone(&self.handle), options) {
            Ok(node) => Arc::new(node),
            Err(err) => {
                event!(Level::WARN, error = %err, "node construction failed");
                return Err(err);
            }
        };

        {
            let mut topology = self.topology.write()?;
            if topology.nodes.contains(node.id()) {
                event!(Level::WARN, node_id = %node.id(), "node id already in use");
                return Err(ClusterError::NodeExists(node.id().to_string()));
            }

            let mut node_ids = topology.node_ids();
            node_ids.push(node.id().to_string());

            // Every map is computed before anything is published.
            let rebalanced = topology
                .buckets
                .iter()
                .map(|bucket| -> Result<(Arc<Bucket>, VbMap)> {
                    Ok((Arc::clone(bucket), bucket.compute_vb_map(&node_ids)?))
                })
                .collect::<Result<Vec<_>>>()?;

            topology.nodes.insert(node.id(), Arc::clone(&node));
            self.handle.record_member(node.id());
            for (bucket, map) in rebalanced {
                bucket.publish_vb_map(map);
            }
            self.handle.bump_revision();
        }

        self.invalidate_config();
        event!(
            Level::INFO,
            node_id = %node.id(),
            hostname = %node.hostname(),
            revision = self.handle.revision(),
            "node joined"
        );
        Ok(node)
    }

    /// Creates a bucket and builds its initial vbucket map over the current
    /// nodes.
    ///
    /// Bucket names are not required to be unique; lookups resolve a shared
    /// name to the bucket created first.
    pub fn add_bucket(&self, options: NewBucketOptions) -> Result<Arc<Bucket>> {
        let span = info_span!(
            "cluster.add_bucket",
            cluster_id = %self.handle.id(),
            bucket = %options.name
        );
        let _enter = span.enter();

        let _mutation = self.handle.lock_mutations()?;
        let bucket = match Bucket::new(Arc::clone(&self.handle), options) {
            Ok(bucket) => Arc::new(bucket),
            Err(err) => {
                event!(Level::WARN, error = %err, "bucket construction failed");
                return Err(err);
            }
        };

        {
            let mut topology = self.topology.write()?;
            let map = bucket.compute_vb_map(&topology.node_ids())?;
            bucket.publish_vb_map(map);

            if topology.buckets.contains(bucket.name()) {
                event!(
                    Level::WARN,
                    "bucket name already in use, lookups keep resolving to the first bucket"
                );
            }
            topology.buckets.insert(bucket.name(), Arc::clone(&bucket));
            self.handle.bump_revision();
        }

        self.invalidate_config();
        event!(
            Level::INFO,
            num_replicas = bucket.num_replicas(),
            revision = self.handle.revision(),
            "bucket created"
        );
        Ok(bucket)
    }

    fn invalidate_config(&self) {
        self.lock_config().invalidate();
    }
}

impl Cluster {
    /// Creates a cluster and joins the initial node.
    ///
    /// A failure to create the initial node fails the whole call; a cluster
    /// is never returned without at least one member.
    pub fn new(options: ClusterOptions) -> Result<Self> {
        let num_vbuckets = if options.num_vbuckets == 0 {
            DEFAULT_NUM_VBUCKETS
        } else {
            options.num_vbuckets
        };
        let replica_latency = if options.replica_latency.is_zero() {
            DEFAULT_REPLICA_LATENCY
        } else {
            options.replica_latency
        };
        let clock = options.clock.unwrap_or_default();
        let config_builder = options
            .config_builder
            .unwrap_or_else(|| Arc::new(JsonConfigBuilder::new()));

        let handle = Arc::new(ClusterHandle::new(
            Uuid::new_v4().to_string(),
            options.enabled_features,
            num_vbuckets,
            replica_latency,
            clock,
        ));

        let cluster = Self {
            handle,
            topology: RwLock::new(Topology {
                nodes: MemberArena::new(),
                buckets: MemberArena::new(),
            }),
            config: Mutex::new(CachedConfig::Invalid),
            config_builder,
        };

        cluster.add_node(options.initial_node)?;

        event!(
            Level::INFO,
            cluster_id = %cluster.id(),
            num_vbuckets,
            replica_latency_ms = u64::try_from(replica_latency.as_millis()).unwrap_or(u64::MAX),
            "cluster created"
        );
        Ok(cluster)
    }
}

// ============================================================================
// mockcluster Library
// ============================================================================
//
// In-memory topology of a simulated storage cluster: member nodes, buckets
// and the vbucket map that assigns each bucket partition to a primary node
// and its replicas. Protocol servers and test harnesses read the topology
// through `Cluster`; all changes go through it as well.

pub mod clock;
pub mod core;
pub mod topology;

// Re-export main types for convenience
pub use clock::VirtualClock;
pub use crate::core::{ClusterError, ClusterFeature, Result};
pub use topology::{
    Bucket, BucketSnapshot, Cluster, ClusterHandle, ClusterOptions, ConfigBuilder,
    JsonConfigBuilder, NewBucketOptions, NewNodeOptions, Node, NodeSnapshot, TopologySnapshot,
    VbEntry, VbMap,
};

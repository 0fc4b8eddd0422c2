pub(crate) mod arena;
pub mod bucket;
pub mod cluster;
pub mod config;
pub mod handle;
pub mod node;
pub mod options;
pub mod vbmap;

pub use bucket::{Bucket, validate_bucket_name};
pub use cluster::Cluster;
pub use config::{BucketSnapshot, ConfigBuilder, JsonConfigBuilder, NodeSnapshot, TopologySnapshot};
pub use handle::ClusterHandle;
pub use node::Node;
pub use options::{
    ClusterOptions, DEFAULT_NODE_HOSTNAME, DEFAULT_NUM_REPLICAS, DEFAULT_NUM_VBUCKETS,
    DEFAULT_REPLICA_LATENCY, MAX_NUM_REPLICAS, NewBucketOptions, NewNodeOptions,
};
pub use vbmap::{VbEntry, VbMap};

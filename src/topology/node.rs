use super::handle::ClusterHandle;
use super::options::NewNodeOptions;
use crate::core::{ClusterError, Result};
use std::sync::Arc;
use uuid::Uuid;

/// A member of the cluster.
///
/// Nodes are created by [`Cluster::add_node`](super::Cluster::add_node) and
/// are referenced everywhere else by [`Node::id`].
#[derive(Debug)]
pub struct Node {
    id: String,
    hostname: String,
    cluster: Arc<ClusterHandle>,
}

impl Node {
    pub(crate) fn new(cluster: Arc<ClusterHandle>, options: NewNodeOptions) -> Result<Self> {
        let id = match options.id {
            Some(id) => {
                let id = id.trim().to_string();
                if id.is_empty() {
                    return Err(ClusterError::InvalidNodeOptions(
                        "node id must not be empty".to_string(),
                    ));
                }
                id
            }
            None => Uuid::new_v4().to_string(),
        };

        let hostname = options.hostname.trim().to_string();
        if hostname.is_empty() {
            return Err(ClusterError::InvalidNodeOptions(format!(
                "hostname for node '{}' must not be empty",
                id
            )));
        }

        Ok(Self {
            id,
            hostname,
            cluster,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Cluster-wide facts this node was created under.
    pub fn cluster(&self) -> &ClusterHandle {
        &self.cluster
    }
}

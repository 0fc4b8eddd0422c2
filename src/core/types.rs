use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability toggle fixed at cluster creation.
///
/// Features are opaque names; the harness driving the cluster decides what
/// each one means for emulated behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterFeature(String);

impl ClusterFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClusterFeature {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClusterFeature {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ClusterFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

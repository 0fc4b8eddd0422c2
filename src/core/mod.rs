pub mod error;
pub mod types;

pub use error::{ClusterError, Result};
pub use types::ClusterFeature;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Invalid node options: {0}")]
    InvalidNodeOptions(String),

    #[error("Invalid bucket options: {0}")]
    InvalidBucketOptions(String),

    #[error("Node '{0}' already exists")]
    NodeExists(String),

    #[error("Invalid vbucket map input: {0}")]
    InvalidVbMap(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

impl<T> From<std::sync::PoisonError<T>> for ClusterError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<serde_json::Error> for ClusterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

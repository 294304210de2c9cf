pub use anyhow::{anyhow, Result};

use thiserror::Error as TError;

#[derive(Debug, TError)]
pub enum Error {
    #[error("failed to list ingresses: {0}")]
    Fetch(#[from] kube::Error),

    #[error("failed to encode bookmarks: {0}")]
    Serialization(#[from] serde_json::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid font shorthand: {0:?}")]
    InvalidFont(String),
    #[error("invalid node data: {0}")]
    InvalidNode(#[from] serde_json::Error),
    #[error("graph input contains no nodes")]
    EmptyGraph,
    #[error("no node labelled {0:?}")]
    NodeNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

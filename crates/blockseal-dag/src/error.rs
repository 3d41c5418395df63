use thiserror::Error;

pub type DagResult<T> = Result<T, DagError>;

#[derive(Debug, Error)]
pub enum DagError {
    #[error("malformed dag-pb node: {0}")]
    Node(#[source] prost::DecodeError),

    #[error("malformed unixfs node: {0}")]
    Unixfs(#[source] prost::DecodeError),

    /// prost does not enforce proto2 `required`, so the check lives here
    #[error("unixfs node has no Type field")]
    MissingType,
}

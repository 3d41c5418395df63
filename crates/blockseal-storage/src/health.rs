//! Storage health check

use opendal::Operator;

use crate::error::StorageResult;

/// Verify an OpenDAL endpoint is reachable by listing the root
pub async fn check_health(op: &Operator) -> StorageResult<()> {
    // A list on the root is the lightest health check
    op.list("/").await?;
    Ok(())
}

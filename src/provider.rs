//! Read-only view of the network provider.

use crate::error::LookupError;
use crate::models::{CidrBlock, SubnetId};
use async_trait::async_trait;

/// Resolves subnet identifiers to their IPv4 ranges.
///
/// Implementations must not mutate anything on the provider side.
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    async fn get_subnet_cidr(&self, subnet_id: &SubnetId) -> Result<CidrBlock, LookupError>;
}

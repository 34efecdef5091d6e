//! Database exposure policy derivation.
//!
//! Turns the public subnet ids of the VPC into the ingress rules of the
//! database security group: TCP on the database port, only from the
//! resolved public subnet blocks. All other sources fall under the implicit
//! default deny.

use crate::error::{LookupError, StackError};
use crate::models::{CidrBlock, IngressRule, Protocol, SecurityPolicy, SubnetId};
use crate::provider::NetworkProvider;
use futures::future::try_join_all;
use itertools::Itertools;
use std::time::Duration;

/// Derive the database ingress policy from the public tier.
///
/// Lookups run concurrently. The resulting block list follows the order of
/// `public_subnet_ids`, not completion order. The first failing lookup
/// aborts the derivation and drops the lookups still in flight, so a
/// policy is either complete or not produced at all.
///
/// # Arguments
/// * `provider` - Resolves subnet ids to CIDR blocks
/// * `public_subnet_ids` - Subnets allowed to reach the database, non-empty
/// * `port` - Database TCP port, 1-65535
/// * `lookup_timeout` - Upper bound on each single lookup
pub async fn derive_policy<P>(
    provider: &P,
    public_subnet_ids: &[SubnetId],
    port: u16,
    lookup_timeout: Duration,
) -> Result<SecurityPolicy, StackError>
where
    P: NetworkProvider + ?Sized,
{
    if public_subnet_ids.is_empty() {
        return Err(StackError::InvalidInput(
            "at least one public subnet id is required".to_string(),
        ));
    }
    if port == 0 {
        return Err(StackError::InvalidInput("port 0 is not a valid TCP port".to_string()));
    }

    log::info!(
        "Resolving {} public subnet(s) for database port {port}",
        public_subnet_ids.len()
    );

    let lookups = public_subnet_ids
        .iter()
        .map(|subnet_id| resolve_cidr(provider, subnet_id, lookup_timeout));
    let cidr_blocks = try_join_all(lookups).await.map_err(|e| {
        log::error!("Policy derivation aborted: {e}");
        e
    })?;

    let rule = IngressRule {
        protocol: Protocol::Tcp,
        from_port: port,
        to_port: port,
        cidr_blocks,
    };
    log::info!("Database ingress: {rule}");
    log::debug!(
        "Sources by subnet: {}",
        public_subnet_ids
            .iter()
            .zip(rule.cidr_blocks.iter())
            .map(|(id, cidr)| format!("{id}={cidr}"))
            .join(" ")
    );

    Ok(SecurityPolicy::new(vec![rule]))
}

/// Resolve one subnet, applying the timeout and rejecting `/0` answers.
async fn resolve_cidr<P>(
    provider: &P,
    subnet_id: &SubnetId,
    lookup_timeout: Duration,
) -> Result<CidrBlock, StackError>
where
    P: NetworkProvider + ?Sized,
{
    let failure = |cause: LookupError| StackError::ResolutionFailure {
        subnet_id: subnet_id.clone(),
        cause,
    };

    let cidr = tokio::time::timeout(lookup_timeout, provider.get_subnet_cidr(subnet_id))
        .await
        .map_err(|_| failure(LookupError::Timeout(lookup_timeout)))?
        .map_err(failure)?;

    if cidr.is_unrestricted() {
        return Err(failure(LookupError::Provider(format!(
            "resolved to unrestricted block {cidr}"
        ))));
    }
    if cidr.addr != cidr.network() {
        log::warn!("{subnet_id} => {cidr} has host bits set, network is {}", cidr.network());
    }
    log::debug!("{subnet_id} => {cidr}");
    Ok(cidr)
}

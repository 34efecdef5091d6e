//! File backed subnet data.
//!
//! A cache file holds a saved `describe-subnets` response, which allows
//! planning without AWS access.

use super::ec2::{parse_describe_subnets, subnet_cidr, DescribeSubnets};
use crate::error::{LookupError, StackError};
use crate::models::{CidrBlock, SubnetId};
use crate::provider::NetworkProvider;
use async_trait::async_trait;
use std::path::Path;

/// Read subnet data from a cache file.
pub fn read_subnet_cache(cache_file: &str) -> Result<DescribeSubnets, StackError> {
    if !Path::new(cache_file).exists() {
        return Err(StackError::InvalidInput(format!(
            "Cache file does not exist: {cache_file}"
        )));
    }
    log::info!("Reading from cache file: {cache_file}");
    let json = std::fs::read_to_string(cache_file)
        .map_err(|e| StackError::ProviderError(format!("Error reading {cache_file}: {e}")))?;
    parse_describe_subnets(&json).map_err(|e| StackError::ProviderError(e.to_string()))
}

/// [`NetworkProvider`] answering from previously saved subnet data.
#[derive(Debug, Default)]
pub struct CachedNetworkProvider {
    data: DescribeSubnets,
}

impl CachedNetworkProvider {
    pub fn new(data: DescribeSubnets) -> CachedNetworkProvider {
        CachedNetworkProvider { data }
    }

    pub fn from_file(cache_file: &str) -> Result<CachedNetworkProvider, StackError> {
        let data = read_subnet_cache(cache_file)?;
        log::info!("Loaded {} subnets from {cache_file}", data.subnets.len());
        Ok(CachedNetworkProvider::new(data))
    }

    pub fn len(&self) -> usize {
        self.data.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.subnets.is_empty()
    }
}

#[async_trait]
impl NetworkProvider for CachedNetworkProvider {
    async fn get_subnet_cidr(&self, subnet_id: &SubnetId) -> Result<CidrBlock, LookupError> {
        subnet_cidr(&self.data, subnet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CACHE_01: &str = "src/tests/test_data/subnet_cache_01.json";

    #[test]
    fn test_read_subnet_cache_01() {
        let data = read_subnet_cache(CACHE_01).expect("Error reading subnet cache");
        assert_eq!(data.subnets.len(), 4, "Expected 4 subnets in test sample");
        assert_eq!(data.subnets[0].vpc_id, "vpc-0demo");
    }

    #[test]
    fn test_missing_cache_file() {
        let err = read_subnet_cache("src/tests/test_data/nope.json").unwrap_err();
        assert!(matches!(err, StackError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_cached_lookup() {
        let provider = CachedNetworkProvider::from_file(CACHE_01).unwrap();
        assert_eq!(provider.len(), 4);
        let id = SubnetId::new("subnet-0pub2").unwrap();
        let cidr = provider.get_subnet_cidr(&id).await.unwrap();
        assert_eq!(cidr.to_string(), "10.0.2.0/24");

        let missing = SubnetId::new("subnet-0gone").unwrap();
        assert_eq!(
            provider.get_subnet_cidr(&missing).await,
            Err(LookupError::NotFound)
        );
    }
}

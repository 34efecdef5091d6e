//! Subnet lookups through `aws ec2 describe-subnets`.

use super::cli;
use crate::error::LookupError;
use crate::models::{CidrBlock, Subnet, SubnetId};
use crate::provider::NetworkProvider;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static SUBNET_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_subnet_id_regex() -> &'static Regex {
    SUBNET_ID_REGEX.get_or_init(|| Regex::new(r"^subnet-[0-9a-zA-Z]+$").expect("Invalid Regex"))
}

/// Response body of `describe-subnets`.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSubnets {
    pub subnets: Vec<Subnet>,
}

/// Parse a `describe-subnets` response.
pub fn parse_describe_subnets(output: &str) -> Result<DescribeSubnets, LookupError> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        LookupError::Provider(format!(
            "Error parsing describe-subnets output: path={} error={}",
            e.path(),
            e
        ))
    })
}

/// Pick the IPv4 block of `subnet_id` out of a parsed response.
pub fn subnet_cidr(
    response: &DescribeSubnets,
    subnet_id: &SubnetId,
) -> Result<CidrBlock, LookupError> {
    let subnet = response
        .subnets
        .iter()
        .find(|s| &s.subnet_id == subnet_id)
        .ok_or(LookupError::NotFound)?;
    subnet.cidr_block.ok_or_else(|| {
        LookupError::Provider(format!("subnet {subnet_id} has no IPv4 CIDR block"))
    })
}

/// [`NetworkProvider`] backed by the AWS CLI.
///
/// Credentials and region come from the usual AWS CLI configuration unless
/// a region is set explicitly.
#[derive(Debug, Clone, Default)]
pub struct AwsCliNetworkProvider {
    pub region: Option<String>,
}

impl AwsCliNetworkProvider {
    pub fn new(region: Option<String>) -> AwsCliNetworkProvider {
        AwsCliNetworkProvider { region }
    }

    fn describe_command(&self, subnet_id: &SubnetId) -> String {
        let mut cmd = format!("aws ec2 describe-subnets --subnet-ids {subnet_id} --output json");
        if let Some(region) = &self.region {
            cmd.push_str(&format!(" --region {region}"));
        }
        cmd
    }
}

#[async_trait]
impl NetworkProvider for AwsCliNetworkProvider {
    async fn get_subnet_cidr(&self, subnet_id: &SubnetId) -> Result<CidrBlock, LookupError> {
        if !get_subnet_id_regex().is_match(subnet_id.as_str()) {
            log::warn!("Malformed subnet id '{subnet_id}', not querying AWS");
            return Err(LookupError::NotFound);
        }

        let output = cli::run(&self.describe_command(subnet_id))
            .await
            .map_err(|e| {
                if e.message().contains("InvalidSubnetID.NotFound") {
                    LookupError::NotFound
                } else {
                    LookupError::Provider(e.to_string())
                }
            })?;

        let response = parse_describe_subnets(&output)?;
        let cidr = subnet_cidr(&response, subnet_id)?;
        log::info!("resolved {subnet_id} => {cidr}");
        Ok(cidr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "Subnets": [
            {
                "AvailabilityZone": "us-east-1a",
                "CidrBlock": "10.0.1.0/24",
                "MapPublicIpOnLaunch": true,
                "State": "available",
                "SubnetId": "subnet-0a1",
                "VpcId": "vpc-123"
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_pick() {
        let response = parse_describe_subnets(RESPONSE).unwrap();
        let id = SubnetId::new("subnet-0a1").unwrap();
        assert_eq!(subnet_cidr(&response, &id).unwrap().to_string(), "10.0.1.0/24");

        let other = SubnetId::new("subnet-0b2").unwrap();
        assert_eq!(subnet_cidr(&response, &other), Err(LookupError::NotFound));
    }

    #[test]
    fn test_parse_error_names_path() {
        let bad = r#"{"Subnets": [{"SubnetId": "subnet-1", "VpcId": "vpc-1", "CidrBlock": "10.0.1.0"}]}"#;
        match parse_describe_subnets(bad) {
            Err(LookupError::Provider(msg)) => {
                assert!(msg.contains("Subnets[0].CidrBlock"), "{msg}")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_ipv4_block() {
        let json = r#"{"Subnets": [{"SubnetId": "subnet-1", "VpcId": "vpc-1"}]}"#;
        let response = parse_describe_subnets(json).unwrap();
        let id = SubnetId::new("subnet-1").unwrap();
        assert!(matches!(subnet_cidr(&response, &id), Err(LookupError::Provider(_))));
    }

    #[test]
    fn test_describe_command() {
        let id = SubnetId::new("subnet-0a1").unwrap();
        let provider = AwsCliNetworkProvider::new(Some("eu-west-1".into()));
        assert_eq!(
            provider.describe_command(&id),
            "aws ec2 describe-subnets --subnet-ids subnet-0a1 --output json --region eu-west-1"
        );
    }

    #[tokio::test]
    async fn test_malformed_id_not_queried() {
        let provider = AwsCliNetworkProvider::default();
        let id = SubnetId::new("subnet-x; rm").unwrap();
        assert_eq!(provider.get_subnet_cidr(&id).await, Err(LookupError::NotFound));
    }
}

//! AWS subnet data model.

use super::CidrBlock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a VPC subnet, e.g. `subnet-0a1b2c3d`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SubnetId(String);

impl SubnetId {
    pub fn new(id: impl Into<String>) -> Result<SubnetId, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Subnet id must not be empty".to_string());
        }
        Ok(SubnetId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One subnet record as described by `aws ec2 describe-subnets`.
///
/// Only the fields this crate reads are mapped, anything else in the
/// response is ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    /// Subnet identifier.
    pub subnet_id: SubnetId,
    /// Owning VPC.
    pub vpc_id: String,
    /// IPv4 range of the subnet (absent for IPv6-only subnets).
    pub cidr_block: Option<CidrBlock>,
    /// Availability zone, e.g. `us-east-1a`.
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Whether instances get a public IP on launch.
    #[serde(default)]
    pub map_public_ip_on_launch: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_id_rejects_blank() {
        assert!(SubnetId::new("  ").is_err());
        assert_eq!(SubnetId::new(" subnet-A ").unwrap().as_str(), "subnet-A");
    }

    #[test]
    fn test_subnet_from_describe_json() {
        let json = r#"{
            "SubnetId": "subnet-0a1",
            "VpcId": "vpc-123",
            "CidrBlock": "10.0.1.0/24",
            "AvailabilityZone": "us-east-1a",
            "MapPublicIpOnLaunch": true,
            "State": "available"
        }"#;
        let subnet: Subnet = serde_json::from_str(json).unwrap();
        assert_eq!(subnet.subnet_id.as_str(), "subnet-0a1");
        assert_eq!(subnet.cidr_block.unwrap().to_string(), "10.0.1.0/24");
        assert_eq!(subnet.map_public_ip_on_launch, Some(true));
    }
}

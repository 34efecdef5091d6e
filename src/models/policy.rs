//! Security group ingress policy model.

use super::CidrBlock;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport protocol of an ingress rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
        }
    }
}

/// One admitted traffic pattern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    pub protocol: Protocol,
    pub from_port: u16,
    pub to_port: u16,
    pub cidr_blocks: Vec<CidrBlock>,
}

impl IngressRule {
    /// True if any source block admits the whole address space.
    pub fn is_unrestricted(&self) -> bool {
        self.cidr_blocks.iter().any(CidrBlock::is_unrestricted)
    }
}

impl fmt::Display for IngressRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}-{} from [{}]",
            self.protocol,
            self.from_port,
            self.to_port,
            self.cidr_blocks.iter().join(", ")
        )
    }
}

/// Ordered ingress rules of a security group.
///
/// Traffic that matches no rule is dropped by the provider's implicit
/// default deny, so no explicit deny rule is ever emitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityPolicy {
    pub ingress: Vec<IngressRule>,
}

impl SecurityPolicy {
    pub fn new(ingress: Vec<IngressRule>) -> SecurityPolicy {
        SecurityPolicy { ingress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_json_shape() {
        let rule = IngressRule {
            protocol: Protocol::Tcp,
            from_port: 3306,
            to_port: 3306,
            cidr_blocks: vec![CidrBlock::new("10.0.1.0/24").unwrap()],
        };
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"protocol":"tcp","fromPort":3306,"toPort":3306,"cidrBlocks":["10.0.1.0/24"]}"#
        );
        assert_eq!(rule.to_string(), "tcp/3306-3306 from [10.0.1.0/24]");
        assert!(!rule.is_unrestricted());
    }

    #[test]
    fn test_only_tcp_protocol_accepted() {
        assert_eq!(serde_json::from_str::<Protocol>(r#""tcp""#).unwrap(), Protocol::Tcp);
        assert!(serde_json::from_str::<Protocol>(r#""udp""#).is_err());
    }

    #[test]
    fn test_rule_unrestricted() {
        let rule = IngressRule {
            protocol: Protocol::Tcp,
            from_port: 22,
            to_port: 22,
            cidr_blocks: vec![
                CidrBlock::new("10.0.1.0/24").unwrap(),
                CidrBlock::UNRESTRICTED,
            ],
        };
        assert!(rule.is_unrestricted());
    }
}

//! VPC network tiers.

use super::SubnetId;
use crate::error::StackError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Routing class of a tier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    /// Routed to the internet gateway.
    Public,
    /// No internet gateway route.
    Private,
}

/// Named set of subnets sharing a routing class.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkTier {
    pub kind: TierKind,
    pub subnet_ids: Vec<SubnetId>,
}

impl NetworkTier {
    pub fn new(kind: TierKind, subnet_ids: Vec<SubnetId>) -> NetworkTier {
        NetworkTier { kind, subnet_ids }
    }

    pub fn len(&self) -> usize {
        self.subnet_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnet_ids.is_empty()
    }
}

/// An already provisioned VPC and its subnet tiers.
///
/// Built once via [`NetworkTopology::new`] and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopology {
    pub vpc_id: String,
    pub public: NetworkTier,
    pub private: NetworkTier,
}

impl NetworkTopology {
    /// Build a topology, rejecting empty tiers, repeated ids and any subnet
    /// listed in both tiers.
    pub fn new(
        vpc_id: impl Into<String>,
        public: Vec<SubnetId>,
        private: Vec<SubnetId>,
    ) -> Result<NetworkTopology, StackError> {
        let vpc_id = vpc_id.into();
        if vpc_id.trim().is_empty() {
            return Err(StackError::InvalidInput("VPC id must not be empty".into()));
        }
        if public.is_empty() {
            return Err(StackError::InvalidInput("public tier has no subnets".into()));
        }
        if private.is_empty() {
            return Err(StackError::InvalidInput("private tier has no subnets".into()));
        }

        let mut seen = HashSet::new();
        for id in public.iter().chain(private.iter()) {
            if !seen.insert(id) {
                return Err(StackError::InvalidInput(format!(
                    "subnet '{id}' listed more than once across public and private tiers"
                )));
            }
        }

        Ok(NetworkTopology {
            vpc_id,
            public: NetworkTier::new(TierKind::Public, public),
            private: NetworkTier::new(TierKind::Private, private),
        })
    }
}

impl fmt::Display for NetworkTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} public, {} private subnets)",
            self.vpc_id,
            self.public.len(),
            self.private.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<SubnetId> {
        raw.iter().map(|s| SubnetId::new(*s).unwrap()).collect()
    }

    #[test]
    fn test_topology_ok() {
        let topo = NetworkTopology::new("vpc-1", ids(&["subnet-A", "subnet-B"]), ids(&["subnet-C"]))
            .unwrap();
        assert_eq!(topo.public.kind, TierKind::Public);
        assert_eq!(topo.public.len(), 2);
        assert_eq!(topo.to_string(), "vpc-1 (2 public, 1 private subnets)");
    }

    #[test]
    fn test_tiers_must_be_disjoint() {
        let err =
            NetworkTopology::new("vpc-1", ids(&["subnet-A"]), ids(&["subnet-A"])).unwrap_err();
        assert!(matches!(err, StackError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_tier_rejected() {
        assert!(NetworkTopology::new("vpc-1", vec![], ids(&["subnet-C"])).is_err());
        assert!(NetworkTopology::new("vpc-1", ids(&["subnet-A"]), vec![]).is_err());
        assert!(NetworkTopology::new(" ", ids(&["subnet-A"]), ids(&["subnet-C"])).is_err());
    }
}

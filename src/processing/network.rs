//! VPC resource description.

use crate::models::{owner_tags, NetworkTopology, ResourceNode, ResourceSpec, VpcSpec};

pub fn vpc_name(owner: &str) -> String {
    format!("{owner}-vpc")
}

/// Describe the VPC holding both subnet tiers.
pub fn vpc_node(owner: &str, topology: &NetworkTopology) -> ResourceNode {
    let name = vpc_name(owner);
    ResourceNode::new(
        name.clone(),
        ResourceSpec::Vpc(VpcSpec {
            name,
            vpc_id: topology.vpc_id.clone(),
            public: topology.public.clone(),
            private: topology.private.clone(),
            tags: owner_tags(owner),
        }),
    )
}

//! EKS cluster resource description.

use crate::models::{
    owner_tags, ClusterSpec, NetworkTopology, ResourceNode, ResourceSpec, RoleMapping,
};

pub const INSTANCE_TYPE: &str = "t3.medium";
pub const DESIRED_CAPACITY: u32 = 2;
pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 2;

const _: () = assert!(MIN_SIZE <= DESIRED_CAPACITY && DESIRED_CAPACITY <= MAX_SIZE);

pub fn cluster_name(owner: &str) -> String {
    format!("{owner}-eks-cluster")
}

/// Role mapping granting every authenticated IAM principal cluster admin.
// TODO: replace with per-role mappings once IAM roles are part of the stack config.
pub fn open_role_mappings() -> Vec<RoleMapping> {
    vec![RoleMapping {
        role_arn: "*".to_string(),
        username: "*".to_string(),
        groups: vec!["system:masters".to_string()],
    }]
}

/// Describe the cluster, placed in the public tier of the VPC.
pub fn cluster_node(owner: &str, topology: &NetworkTopology, vpc_node: &str) -> ResourceNode {
    let name = cluster_name(owner);
    let spec = ClusterSpec {
        name: name.clone(),
        vpc_id: topology.vpc_id.clone(),
        subnet_ids: topology.public.subnet_ids.clone(),
        instance_type: INSTANCE_TYPE.to_string(),
        desired_capacity: DESIRED_CAPACITY,
        min_size: MIN_SIZE,
        max_size: MAX_SIZE,
        role_mappings: open_role_mappings(),
        tags: owner_tags(owner),
    };
    ResourceNode::new(name, ResourceSpec::EksCluster(spec)).depends_on(vpc_node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubnetId;

    #[test]
    fn test_cluster_uses_public_subnets() {
        let topology = NetworkTopology::new(
            "vpc-1",
            vec![SubnetId::new("subnet-A").unwrap(), SubnetId::new("subnet-B").unwrap()],
            vec![SubnetId::new("subnet-C").unwrap()],
        )
        .unwrap();
        let node = cluster_node("alice", &topology, "alice-vpc");
        assert_eq!(node.name, "alice-eks-cluster");
        assert_eq!(node.depends_on, vec!["alice-vpc"]);
        match node.spec {
            ResourceSpec::EksCluster(spec) => {
                assert_eq!(spec.subnet_ids, topology.public.subnet_ids);
                assert_eq!(spec.instance_type, "t3.medium");
                assert_eq!((spec.min_size, spec.desired_capacity, spec.max_size), (1, 2, 2));
                assert_eq!(spec.role_mappings[0].groups, vec!["system:masters"]);
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }
}

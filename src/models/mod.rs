//! Domain models for the stack plan.
//!
//! - [`CidrBlock`] - IPv4 range in CIDR notation
//! - [`Subnet`] and [`SubnetId`] - AWS subnet records
//! - [`NetworkTier`] and [`NetworkTopology`] - VPC subnet tiers
//! - [`SecurityPolicy`] and [`IngressRule`] - security group rules
//! - [`ResourceNode`] and friends - resource descriptions for the engine

mod cidr;
mod network;
mod policy;
mod resource;
mod subnet;

pub use cidr::{cut_addr, get_cidr_mask, CidrBlock, MAX_LENGTH};
pub use network::{NetworkTier, NetworkTopology, TierKind};
pub use policy::{IngressRule, Protocol, SecurityPolicy};
pub use resource::{
    owner_tags, ClusterSpec, ContainerPort, ContainerSpec, DbInstanceSpec, DbSubnetGroupSpec,
    DeploymentSpec, EnvValue, EnvVar, OutputRef, ResourceNode, ResourceSpec, RoleMapping,
    SecretRef, SecurityGroupSpec, ServicePort, ServiceSpec, ServiceType, Tags, TargetPort,
    VpcSpec,
};
pub use subnet::{Subnet, SubnetId};

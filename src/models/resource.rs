//! Resource descriptions handed to the provisioning engine.
//!
//! Every node in a plan carries a typed spec plus the names of the nodes it
//! consumes outputs from. Values known only after apply (ids, hostnames,
//! secrets) are expressed as [`OutputRef`] or [`SecretRef`], never inlined.

use super::{NetworkTier, SecurityPolicy, SubnetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource tags. Ordered so serialized plans are stable.
pub type Tags = BTreeMap<String, String>;

/// Tag set carrying the stack owner.
pub fn owner_tags(owner: &str) -> Tags {
    let mut tags = Tags::new();
    tags.insert("Owner".to_string(), owner.to_string());
    tags
}

/// Reference to an output of another resource in the plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutputRef {
    pub resource: String,
    pub output: String,
}

impl OutputRef {
    pub fn new(resource: &str, output: &str) -> OutputRef {
        OutputRef {
            resource: resource.to_string(),
            output: output.to_string(),
        }
    }
}

/// Opaque reference to a value held by the secret provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    pub secret: String,
}

/// Environment variable value for a container.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    Ref(OutputRef),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: EnvValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VpcSpec {
    pub name: String,
    pub vpc_id: String,
    pub public: NetworkTier,
    pub private: NetworkTier,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    pub role_arn: String,
    pub username: String,
    pub groups: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterSpec {
    pub name: String,
    pub vpc_id: String,
    pub subnet_ids: Vec<SubnetId>,
    pub instance_type: String,
    pub desired_capacity: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub role_mappings: Vec<RoleMapping>,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    ClusterIP,
    LoadBalancer,
}

/// Container port targeted by a service, by number or by port name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TargetPort {
    Number(u16),
    Name(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServicePort {
    pub port: u16,
    pub target_port: TargetPort,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: String,
    pub namespace: String,
    pub service_type: ServiceType,
    pub ports: Vec<ServicePort>,
    pub selector: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContainerPort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub container_port: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub ports: Vec<ContainerPort>,
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSpec {
    pub name: String,
    pub namespace: String,
    pub replicas: u32,
    pub labels: BTreeMap<String, String>,
    pub containers: Vec<ContainerSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DbSubnetGroupSpec {
    pub name: String,
    pub subnet_ids: Vec<SubnetId>,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupSpec {
    pub name: String,
    pub vpc_id: String,
    pub policy: SecurityPolicy,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DbInstanceSpec {
    pub identifier: String,
    pub db_name: String,
    pub allocated_storage_gib: u32,
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    pub port: u16,
    pub username: String,
    pub password: SecretRef,
    pub skip_final_snapshot: bool,
    pub vpc_security_group_ids: Vec<OutputRef>,
    pub db_subnet_group_name: OutputRef,
    pub tags: Tags,
}

/// Typed description of one resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "spec")]
pub enum ResourceSpec {
    Vpc(VpcSpec),
    EksCluster(ClusterSpec),
    KubeService(ServiceSpec),
    KubeDeployment(DeploymentSpec),
    DbSubnetGroup(DbSubnetGroupSpec),
    SecurityGroup(SecurityGroupSpec),
    DbInstance(DbInstanceSpec),
}

/// A node of the plan graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    /// Unique name within the plan.
    pub name: String,
    /// Names of nodes whose outputs this node consumes.
    pub depends_on: Vec<String>,
    /// Create timeout handed to the engine, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub spec: ResourceSpec,
}

impl ResourceNode {
    pub fn new(name: impl Into<String>, spec: ResourceSpec) -> ResourceNode {
        ResourceNode {
            name: name.into(),
            depends_on: vec![],
            create_timeout_secs: None,
            spec,
        }
    }

    pub fn depends_on(mut self, name: &str) -> ResourceNode {
        self.depends_on.push(name.to_string());
        self
    }

    pub fn create_timeout(mut self, secs: u64) -> ResourceNode {
        self.create_timeout_secs = Some(secs);
        self
    }
}

//! Stack plan assembly.
//!
//! A plan is a DAG of [`ResourceNode`]s. Edges are the `depends_on` names
//! each node declares; the external engine walks them when applying.

use super::{cluster, database, network, policy, workloads};
use crate::config::StackConfig;
use crate::error::StackError;
use crate::models::{OutputRef, ResourceNode, ResourceSpec, SecurityPolicy};
use crate::provider::NetworkProvider;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Value exported from the stack once applied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub from: OutputRef,
    /// Format string, `{}` is replaced by the referenced value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub secret: bool,
}

/// Complete description of the deployment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StackPlan {
    pub owner: String,
    pub resources: Vec<ResourceNode>,
    pub outputs: BTreeMap<String, StackOutput>,
}

impl StackPlan {
    /// Build a plan, checking names are unique, every dependency exists and
    /// the graph has no cycle.
    pub fn new(
        owner: impl Into<String>,
        resources: Vec<ResourceNode>,
        outputs: BTreeMap<String, StackOutput>,
    ) -> Result<StackPlan, StackError> {
        let plan = StackPlan {
            owner: owner.into(),
            resources,
            outputs,
        };
        plan.apply_order()?;
        for (key, output) in &plan.outputs {
            if plan.resource(&output.from.resource).is_none() {
                return Err(StackError::InvalidInput(format!(
                    "output '{key}' refers to unknown resource '{}'",
                    output.from.resource
                )));
            }
        }
        Ok(plan)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceNode> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Policy attached to the database security group.
    pub fn database_policy(&self) -> Option<&SecurityPolicy> {
        self.resources.iter().find_map(|r| match &r.spec {
            ResourceSpec::SecurityGroup(sg) => Some(&sg.policy),
            _ => None,
        })
    }

    /// Node names ordered so every node follows its dependencies.
    ///
    /// Ties keep plan order, so the result is deterministic.
    pub fn apply_order(&self) -> Result<Vec<&str>, StackError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, node) in self.resources.iter().enumerate() {
            if index.insert(node.name.as_str(), i).is_some() {
                return Err(StackError::InvalidInput(format!(
                    "duplicate resource name '{}'",
                    node.name
                )));
            }
        }

        let mut pending = vec![0usize; self.resources.len()];
        let mut dependents: Vec<Vec<usize>> = vec![vec![]; self.resources.len()];
        for (i, node) in self.resources.iter().enumerate() {
            for dep in &node.depends_on {
                let &d = index.get(dep.as_str()).ok_or_else(|| {
                    StackError::InvalidInput(format!(
                        "resource '{}' depends on unknown resource '{dep}'",
                        node.name
                    ))
                })?;
                pending[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut ready: VecDeque<usize> = (0..self.resources.len())
            .filter(|i| pending[*i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.resources.len());
        while let Some(i) = ready.pop_front() {
            order.push(self.resources[i].name.as_str());
            for &j in &dependents[i] {
                pending[j] -= 1;
                if pending[j] == 0 {
                    ready.push_back(j);
                }
            }
        }

        if order.len() != self.resources.len() {
            let stuck: Vec<&str> = self
                .resources
                .iter()
                .enumerate()
                .filter(|(i, _)| pending[*i] > 0)
                .map(|(_, r)| r.name.as_str())
                .collect();
            return Err(StackError::InvalidInput(format!(
                "dependency cycle between {stuck:?}"
            )));
        }
        Ok(order)
    }
}

/// Describe the whole stack.
///
/// The only network calls made are the read-only subnet lookups of the
/// database policy. Any failure returns no plan at all.
pub async fn plan_stack<P>(config: &StackConfig, provider: &P) -> Result<StackPlan, StackError>
where
    P: NetworkProvider + ?Sized,
{
    let owner = config.owner_tag.as_str();
    log::info!("#Start plan_stack() owner={owner} vpc={}", config.topology);

    let vpc = network::vpc_node(owner, &config.topology);
    let cluster = cluster::cluster_node(owner, &config.topology, &vpc.name);
    let cluster_name = cluster.name.clone();
    let vpc_name = vpc.name.clone();

    let mut resources = vec![
        vpc,
        cluster,
        workloads::redis_service_node(&cluster_name),
        workloads::redis_deployment_node(&cluster_name),
        workloads::webapp_deployment_node(&cluster_name, &config.web_app_image),
        workloads::webapp_service_node(&cluster_name),
    ];

    let db_policy = policy::derive_policy(
        provider,
        &config.topology.public.subnet_ids,
        config.db_port,
        config.lookup_timeout,
    )
    .await?;
    resources.extend(database::database_nodes(config, db_policy, &vpc_name));

    let outputs = BTreeMap::from([
        (
            "kubeconfig".to_string(),
            StackOutput {
                from: OutputRef::new(&cluster_name, "kubeconfig"),
                template: None,
                secret: true,
            },
        ),
        (
            "web_app_url".to_string(),
            StackOutput {
                from: OutputRef::new(
                    workloads::WEBAPP_SERVICE,
                    "status.loadBalancer.ingress[0].hostname",
                ),
                template: Some("http://{}".to_string()),
                secret: false,
            },
        ),
    ]);

    let plan = StackPlan::new(owner, resources, outputs)?;
    log::info!("Planned {} resources", plan.resources.len());
    Ok(plan)
}

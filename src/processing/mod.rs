//! Stack planning logic.
//!
//! - [`policy`] - Database exposure policy derivation
//! - [`network`], [`cluster`], [`workloads`], [`database`] - Resource descriptions
//! - [`stack`] - Assembly into a validated plan

mod cluster;
mod database;
mod network;
mod policy;
mod stack;
mod workloads;

pub use cluster::cluster_node;
pub use database::{database_nodes, db_name, rds_identifier};
pub use network::vpc_node;
pub use policy::derive_policy;
pub use stack::{plan_stack, StackOutput, StackPlan};
pub use workloads::redis_url;

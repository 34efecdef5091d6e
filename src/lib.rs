//! Declarative plan for a web application stack on AWS.
//!
//! The plan covers a VPC, an EKS cluster running Redis and the web app
//! behind a load balancer, and an RDS MySQL instance whose security group
//! admits the database port only from the public subnets.
//!
//! Modules:
//! - [`aws`] - AWS CLI interaction and subnet lookups
//! - [`config`] - Environment driven configuration
//! - [`error`] - Error types
//! - [`models`] - Domain data structures
//! - [`output`] - Plan rendering
//! - [`processing`] - Policy derivation and plan assembly
//! - [`provider`] - Network provider trait

pub mod aws;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod provider;

pub use config::StackConfig;
pub use error::{LookupError, StackError};
pub use processing::{derive_policy, plan_stack, StackPlan};
pub use provider::NetworkProvider;

use aws::{AwsCliNetworkProvider, CachedNetworkProvider};

/// Pick the network provider for `config`: the subnet cache file when one
/// is configured, the AWS CLI otherwise.
pub fn network_provider(config: &StackConfig) -> Result<Box<dyn NetworkProvider>, StackError> {
    match &config.subnet_cache_file {
        Some(file) => Ok(Box::new(CachedNetworkProvider::from_file(file)?)),
        None => {
            log::info!("Resolving subnets with the AWS CLI");
            Ok(Box::new(AwsCliNetworkProvider::new(config.aws_region.clone())))
        }
    }
}

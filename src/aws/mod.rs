//! AWS CLI interaction.
//!
//! - [`cli`] - Command execution for the AWS CLI
//! - [`ec2`] - Subnet lookups via `describe-subnets`
//! - [`cache`] - Subnet data saved to a file

mod cache;
mod cli;
mod ec2;

pub use cache::{read_subnet_cache, CachedNetworkProvider};
pub use cli::{run, CliError};
pub use ec2::{parse_describe_subnets, AwsCliNetworkProvider, DescribeSubnets};

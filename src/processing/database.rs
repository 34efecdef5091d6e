//! RDS MySQL tier: subnet group, security group and instance.

use crate::config::StackConfig;
use crate::error::StackError;
use crate::models::{
    owner_tags, DbInstanceSpec, DbSubnetGroupSpec, OutputRef, ResourceNode, ResourceSpec,
    SecretRef, SecurityGroupSpec, SecurityPolicy,
};

pub const ENGINE: &str = "mysql";
pub const ENGINE_VERSION: &str = "8.0";
pub const INSTANCE_CLASS: &str = "db.t3.micro";
pub const ALLOCATED_STORAGE_GIB: u32 = 20;
pub const MASTER_USERNAME: &str = "admin";
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// RDS instance and subnet group identifier.
///
/// RDS identifiers allow only lowercase letters, digits and hyphens, must
/// start with a letter, may not contain two hyphens in a row and are at most
/// 63 characters long.
pub fn rds_identifier(owner: &str) -> Result<String, StackError> {
    let identifier: String = format!("{owner}-rds-instance")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let starts_with_letter = identifier.starts_with(|c: char| c.is_ascii_lowercase());
    if !starts_with_letter || identifier.contains("--") || identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(StackError::InvalidInput(format!(
            "owner tag '{owner}' does not produce a valid RDS identifier ('{identifier}')"
        )));
    }
    Ok(identifier)
}

/// Initial database name: alphanumeric only, starting with a letter.
pub fn db_name(owner: &str) -> String {
    let name: String = format!("{owner}RDS")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("db{name}")
    } else {
        name
    }
}

pub fn subnet_group_node_name(owner: &str) -> String {
    format!("{owner}-rds-subnet-group")
}

pub fn security_group_node_name(owner: &str) -> String {
    format!("{owner}-db-security-group")
}

pub fn instance_node_name(owner: &str) -> String {
    format!("{owner}-rds-instance")
}

/// Describe the database tier. `policy` is attached to the security group
/// as is.
pub fn database_nodes(
    config: &StackConfig,
    policy: SecurityPolicy,
    vpc_node: &str,
) -> Vec<ResourceNode> {
    let owner = config.owner_tag.as_str();
    let identifier = config.rds_identifier.clone();
    let subnet_group = subnet_group_node_name(owner);
    let security_group = security_group_node_name(owner);

    let subnet_group_node = ResourceNode::new(
        subnet_group.clone(),
        ResourceSpec::DbSubnetGroup(DbSubnetGroupSpec {
            name: identifier.clone(),
            subnet_ids: config.topology.private.subnet_ids.clone(),
            tags: owner_tags(owner),
        }),
    )
    .depends_on(vpc_node);

    let security_group_node = ResourceNode::new(
        security_group.clone(),
        ResourceSpec::SecurityGroup(SecurityGroupSpec {
            name: security_group.clone(),
            vpc_id: config.topology.vpc_id.clone(),
            policy,
            tags: owner_tags(owner),
        }),
    )
    .depends_on(vpc_node);

    let instance_node = ResourceNode::new(
        instance_node_name(owner),
        ResourceSpec::DbInstance(DbInstanceSpec {
            identifier,
            db_name: db_name(owner),
            allocated_storage_gib: ALLOCATED_STORAGE_GIB,
            engine: ENGINE.to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            instance_class: INSTANCE_CLASS.to_string(),
            port: config.db_port,
            username: MASTER_USERNAME.to_string(),
            password: SecretRef {
                secret: config.db_password_secret.clone(),
            },
            skip_final_snapshot: true,
            vpc_security_group_ids: vec![OutputRef::new(&security_group, "id")],
            db_subnet_group_name: OutputRef::new(&subnet_group, "name"),
            tags: owner_tags(owner),
        }),
    )
    .depends_on(&security_group)
    .depends_on(&subnet_group);

    vec![subnet_group_node, security_group_node, instance_node]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rds_identifier() {
        assert_eq!(rds_identifier("Alice").unwrap(), "alice-rds-instance");
        assert_eq!(rds_identifier("Team_Blue.42").unwrap(), "teamblue42-rds-instance");
        assert!(rds_identifier("!!!").is_err());
        assert!(rds_identifier("42team").is_err());
    }

    #[test]
    fn test_rds_identifier_hyphens_and_length() {
        assert!(rds_identifier("a--b").is_err());
        assert!(rds_identifier("team-").is_err());
        assert_eq!(rds_identifier("a.-b").unwrap(), "a-b-rds-instance");

        // "-rds-instance" adds 13 characters.
        let longest = "a".repeat(MAX_IDENTIFIER_LEN - 13);
        assert_eq!(rds_identifier(&longest).unwrap().len(), MAX_IDENTIFIER_LEN);
        assert!(rds_identifier(&format!("{longest}b")).is_err());
    }

    #[test]
    fn test_db_name() {
        assert_eq!(db_name("alice"), "aliceRDS");
        assert_eq!(db_name("team-blue"), "teamblueRDS");
        assert_eq!(db_name("42"), "db42RDS");
    }
}

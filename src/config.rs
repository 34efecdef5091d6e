//! Stack configuration, read once at startup.

use crate::error::StackError;
use crate::models::{NetworkTopology, SubnetId};
use crate::processing::rds_identifier;
use std::time::Duration;

pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_PASSWORD_SECRET: &str = "rdspassword";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Validated configuration for one planning run.
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Used for resource names and the `Owner` tag.
    pub owner_tag: String,
    /// RDS identifier derived from the owner tag.
    pub rds_identifier: String,
    /// Container image of the web application.
    pub web_app_image: String,
    pub topology: NetworkTopology,
    pub db_port: u16,
    /// Name of the secret holding the database password.
    pub db_password_secret: String,
    /// Per subnet lookup timeout.
    pub lookup_timeout: Duration,
    /// Read subnets from this file instead of calling the AWS CLI.
    pub subnet_cache_file: Option<String>,
    /// Region passed to the AWS CLI, CLI default when unset.
    pub aws_region: Option<String>,
    /// Write the plan here instead of stdout.
    pub plan_output_file: Option<String>,
}

impl StackConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<StackConfig, StackError> {
        StackConfig::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns the raw value of a
    /// variable or `None` when unset.
    ///
    /// Owner tag and image are checked first so their absence is reported
    /// before anything else is parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<StackConfig, StackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &str| {
            get(name).ok_or_else(|| StackError::ConfigurationMissing(name.to_string()))
        };

        let owner_tag = require("OWNER_TAG")?;
        let web_app_image = require("WEB_APP_IMAGE")?;
        let db_identifier = rds_identifier(&owner_tag)?;

        let vpc_id = require("VPC_ID")?;
        let public = parse_subnet_ids(&require("PUBLIC_SUBNET_IDS")?)?;
        let private = parse_subnet_ids(&require("PRIVATE_SUBNET_IDS")?)?;
        let topology = NetworkTopology::new(vpc_id, public, private)?;

        let db_port = match get("DB_PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_DB_PORT,
        };

        let lookup_timeout_secs = match get("LOOKUP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                StackError::InvalidInput(format!(
                    "LOOKUP_TIMEOUT_SECS '{raw}' is not a positive integer"
                ))
            })?,
            None => DEFAULT_LOOKUP_TIMEOUT_SECS,
        };

        let config = StackConfig {
            owner_tag,
            rds_identifier: db_identifier,
            web_app_image,
            topology,
            db_port,
            db_password_secret: get("RDS_PASSWORD_SECRET")
                .unwrap_or_else(|| DEFAULT_PASSWORD_SECRET.to_string()),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            subnet_cache_file: get("SUBNET_CACHE_FILE"),
            aws_region: get("AWS_REGION"),
            plan_output_file: get("PLAN_OUTPUT_FILE"),
        };
        log::debug!(
            "config owner={} vpc={} db_port={}",
            config.owner_tag,
            config.topology,
            config.db_port
        );
        Ok(config)
    }
}

/// Split a comma separated id list, ignoring blanks.
pub fn parse_subnet_ids(raw: &str) -> Result<Vec<SubnetId>, StackError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| SubnetId::new(s).map_err(StackError::InvalidInput))
        .collect()
}

/// Parse a TCP port in 1-65535.
pub fn parse_port(raw: &str) -> Result<u16, StackError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| StackError::InvalidInput(format!("'{raw}' is not a valid TCP port")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("OWNER_TAG", "Alice"),
            ("WEB_APP_IMAGE", "registry/webapp:1.0"),
            ("VPC_ID", "vpc-1"),
            ("PUBLIC_SUBNET_IDS", "subnet-A, subnet-B"),
            ("PRIVATE_SUBNET_IDS", "subnet-C,subnet-D,"),
        ])
    }

    #[test]
    fn test_defaults() {
        let vars = full_env();
        let config = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.owner_tag, "Alice");
        assert_eq!(config.rds_identifier, "alice-rds-instance");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_password_secret, "rdspassword");
        assert_eq!(config.lookup_timeout, Duration::from_secs(10));
        assert_eq!(config.topology.public.len(), 2);
        assert_eq!(config.topology.private.len(), 2);
        assert!(config.subnet_cache_file.is_none());
    }

    #[test]
    fn test_missing_owner_tag_reported_first() {
        let mut vars = full_env();
        vars.remove("OWNER_TAG");
        vars.remove("VPC_ID");
        let err = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, StackError::ConfigurationMissing(name) if name == "OWNER_TAG"));
    }

    #[test]
    fn test_blank_image_is_missing() {
        let mut vars = full_env();
        vars.insert("WEB_APP_IMAGE".into(), "   ".into());
        let err = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, StackError::ConfigurationMissing(name) if name == "WEB_APP_IMAGE"));
    }

    #[test]
    fn test_owner_tag_must_give_rds_identifier() {
        let mut vars = full_env();
        for bad in ["42team", "a--b", "!!!"] {
            vars.insert("OWNER_TAG".into(), bad.into());
            let err = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
            assert!(matches!(err, StackError::InvalidInput(_)), "owner {bad}");
        }
    }

    #[test]
    fn test_db_port_override_and_validation() {
        let mut vars = full_env();
        vars.insert("DB_PORT".into(), "3307".into());
        let config = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.db_port, 3307);

        for bad in ["0", "65536", "mysql"] {
            vars.insert("DB_PORT".into(), bad.into());
            let err = StackConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
            assert!(matches!(err, StackError::InvalidInput(_)), "port {bad}");
        }
    }

    #[test]
    fn test_lookup_timeout_must_be_positive() {
        let mut vars = full_env();
        vars.insert("LOOKUP_TIMEOUT_SECS".into(), "0".into());
        assert!(StackConfig::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn test_parse_subnet_ids() {
        let ids = parse_subnet_ids(" subnet-A ,, subnet-B ").unwrap();
        let ids: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["subnet-A", "subnet-B"]);
        assert!(parse_subnet_ids("").unwrap().is_empty());
    }
}

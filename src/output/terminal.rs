//! Terminal summary of a plan.

use crate::error::StackError;
use crate::processing::StackPlan;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Summary lines: apply order, then one row per database ingress rule.
pub fn summary_lines(plan: &StackPlan) -> Result<Vec<String>, StackError> {
    let mut lines = vec![format!(
        "#{} owner={} resources={}",
        "PLAN".on_blue(),
        plan.owner,
        plan.resources.len()
    )];
    lines.push(format!("apply order: {}", plan.apply_order()?.iter().join(" -> ")));

    lines.push(format!(
        "{},{},{},{}",
        format_field("protocol", 10),
        format_field("from", 7),
        format_field("to", 7),
        "\"sources\""
    ));
    if let Some(policy) = plan.database_policy() {
        for rule in &policy.ingress {
            lines.push(format!(
                "{},{},{},{}",
                format_field(rule.protocol, 10),
                format_field(rule.from_port, 7),
                format_field(rule.to_port, 7),
                format_field(rule.cidr_blocks.iter().join(" "), 0)
            ));
        }
    }
    Ok(lines)
}

/// Print the summary to stderr, leaving stdout for the plan itself.
pub fn print_summary(plan: &StackPlan) -> Result<(), StackError> {
    for line in summary_lines(plan)? {
        eprintln!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CidrBlock, Protocol};

    #[test]
    fn test_format_field_protocol_column() {
        assert_eq!(format_field(Protocol::Tcp, 10), "     \"tcp\"");
    }

    #[test]
    fn test_format_field_port_columns() {
        assert_eq!(format_field(3306, 7), " \"3306\"");
        assert_eq!(format_field(22, 7), "   \"22\"");
        assert_eq!(format_field(65535, 7), "\"65535\"");
    }

    #[test]
    fn test_format_field_cidr_list_not_truncated() {
        let sources = ["10.0.1.0/24", "10.0.2.0/24"]
            .iter()
            .map(|c| CidrBlock::new(c).unwrap())
            .join(" ");
        assert_eq!(format_field(&sources, 12), "\"10.0.1.0/24 10.0.2.0/24\"");
    }
}

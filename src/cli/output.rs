//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::{Group, Rule};
use crate::domain::Metric;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Rule entry for display
#[derive(Debug, Clone, Serialize)]
pub struct RuleEntry {
    pub kind: String,
    pub name: String,
    /// Fingerprint as 16 hex digits
    pub id: String,
    pub expr: String,
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,
}

impl From<&Rule> for RuleEntry {
    fn from(rule: &Rule) -> Self {
        Self {
            kind: rule.kind().to_string(),
            name: rule.name().to_string(),
            id: format!("{:016x}", rule.id),
            expr: rule.expr.clone(),
            for_duration: rule.for_duration.map(|d| d.to_string()),
        }
    }
}

impl TableDisplay for RuleEntry {
    fn to_table(&self) -> String {
        let mut line = format!("{:<9} {} [{}] {}", self.kind, self.name, self.id, self.expr);
        if let Some(d) = &self.for_duration {
            line.push_str(&format!(" (for {})", d));
        }
        line
    }

    fn to_compact(&self) -> String {
        self.name.clone()
    }
}

/// Group entry for display
#[derive(Debug, Clone, Serialize)]
pub struct GroupEntry {
    pub file: String,
    pub name: String,
    pub tenant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    pub concurrency: usize,
    pub checksum: String,
    pub rules: Vec<RuleEntry>,
}

impl From<&Group> for GroupEntry {
    fn from(group: &Group) -> Self {
        Self {
            file: group.file.clone(),
            name: group.name.clone(),
            tenant: group.tenant.clone(),
            interval: group.interval.map(|d| d.to_string()),
            concurrency: group.concurrency,
            checksum: group.checksum.clone(),
            rules: group.rules.iter().map(RuleEntry::from).collect(),
        }
    }
}

impl TableDisplay for GroupEntry {
    fn to_table(&self) -> String {
        let mut output = format!("Group: {} ({})\n", self.name, self.file);
        if !self.tenant.is_empty() {
            output.push_str(&format!("  Tenant:      {}\n", self.tenant));
        }
        if let Some(interval) = &self.interval {
            output.push_str(&format!("  Interval:    {}\n", interval));
        }
        if self.concurrency > 0 {
            output.push_str(&format!("  Concurrency: {}\n", self.concurrency));
        }
        output.push_str(&format!("  Checksum:    {}\n", self.checksum));
        output.push_str(&format!("  Rules ({}):\n", self.rules.len()));
        for rule in &self.rules {
            output.push_str("    ");
            output.push_str(&rule.to_table());
            output.push('\n');
        }
        output
    }

    fn to_compact(&self) -> String {
        format!("{}:{}({})", self.file, self.name, self.rules.len())
    }
}

/// Loaded groups for display
#[derive(Debug, Clone, Serialize)]
pub struct GroupList {
    pub groups: Vec<GroupEntry>,
}

impl GroupList {
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }
}

impl From<&[Group]> for GroupList {
    fn from(groups: &[Group]) -> Self {
        Self {
            groups: groups.iter().map(GroupEntry::from).collect(),
        }
    }
}

impl TableDisplay for GroupList {
    fn to_table(&self) -> String {
        let mut output = String::new();
        for group in &self.groups {
            output.push_str(&group.to_table());
            output.push('\n');
        }
        output.push_str(&format!(
            "Groups: {}, Rules: {}",
            self.groups.len(),
            self.rule_count()
        ));
        output
    }

    fn to_compact(&self) -> String {
        self.groups
            .iter()
            .map(|g| g.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Instant query result for display
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub samples: Vec<Metric>,
}

impl TableDisplay for QueryResult {
    fn to_table(&self) -> String {
        let mut output = format!("Query: {}\n", self.query);
        output.push_str(&format!("Samples: {}\n", self.samples.len()));
        for sample in &self.samples {
            output.push_str(&format!("  {}\n", sample));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.samples
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

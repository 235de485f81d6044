//! Rule file loading
//!
//! Expands file patterns, decodes each file and validates every group.
//! A load either returns every group from every file or fails as a whole.

use super::de;
use super::group::Group;
use super::rule::join_keys;
use crate::envtemplate;
use crate::error::ConfigError;
use crate::expr::ExprValidator;
use crate::template::TemplateValidator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Settings shared by every group of one file unless the group overrides them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Global {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub tenant: String,
}

/// Top-level layout of a rule file
#[derive(Debug, Default, Deserialize)]
struct RuleFile {
    #[serde(default)]
    global: Option<Global>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_yaml::Value>,
}

/// Fill unset group settings from `global`
///
/// A group's own non-empty tenant always wins.
pub fn apply_global(groups: Vec<Group>, global: Option<&Global>) -> Vec<Group> {
    let Some(global) = global else {
        return groups;
    };
    groups
        .into_iter()
        .map(|mut group| {
            if group.tenant.is_empty() {
                group.tenant = global.tenant.clone();
            }
            group
        })
        .collect()
}

/// Decode the groups of one rule file
///
/// Environment references are substituted, global defaults applied and
/// each group sealed. Groups are not validated here.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Group>, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_str.clone(),
        source,
    })?;
    parse_str(&envtemplate::replace(&raw), &path_str)
}

/// Decode rule file contents; `path` is only used for error context
pub fn parse_str(contents: &str, path: &str) -> Result<Vec<Group>, ConfigError> {
    let file: RuleFile = serde_yaml::from_str::<Option<RuleFile>>(contents)
        .map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?
        .unwrap_or_default();

    if !file.unknown.is_empty() {
        return Err(ConfigError::UnknownFields {
            path: path.to_string(),
            fields: join_keys(&file.unknown),
        });
    }

    apply_global(file.groups, file.global.as_ref())
        .into_iter()
        .map(|group| {
            let name = group.name.clone();
            group.seal().map_err(|source| ConfigError::Checksum {
                path: path.to_string(),
                group: name,
                source,
            })
        })
        .collect()
}

/// Resolve every pattern to concrete paths, in pattern order
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let matches = glob::glob(pattern).map_err(|source| ConfigError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        for entry in matches {
            paths.push(entry.map_err(|source| ConfigError::Glob {
                pattern: pattern.to_string(),
                source,
            })?);
        }
    }
    Ok(paths)
}

/// Load, validate and aggregate groups from all files matching `patterns`
pub fn parse_with<S: AsRef<str>>(
    patterns: &[S],
    expressions: &dyn ExprValidator,
    templates: &dyn TemplateValidator,
    validate_annotations: bool,
    validate_expressions: bool,
) -> Result<Vec<Group>, ConfigError> {
    let mut groups = Vec::new();

    for path in expand_patterns(patterns)? {
        let path_str = path.display().to_string();
        let parsed = parse_file(&path)?;
        log::debug!("Parsed {} group(s) from {}", parsed.len(), path_str);

        let mut names = HashSet::with_capacity(parsed.len());
        for mut group in parsed {
            group
                .validate_with(expressions, templates, validate_annotations, validate_expressions)
                .map_err(|source| ConfigError::InvalidGroup {
                    path: path_str.clone(),
                    group: group.name.clone(),
                    source,
                })?;
            if !names.insert(group.name.clone()) {
                return Err(ConfigError::DuplicateGroup {
                    path: path_str,
                    group: group.name,
                });
            }
            group.file = path_str.clone();
            groups.push(group);
        }
    }

    if groups.is_empty() {
        log::warn!("{}", no_groups_message(patterns));
    } else {
        log::info!("Loaded {} rule group(s)", groups.len());
    }
    Ok(groups)
}

/// Warning logged when a load yields no groups
fn no_groups_message<S: AsRef<str>>(patterns: &[S]) -> String {
    let joined: Vec<&str> = patterns.iter().map(AsRef::as_ref).collect();
    format!("no groups found in {}", joined.join(";"))
}

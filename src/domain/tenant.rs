//! Tenant token
//!
//! Multi-tenancy identifier in the form `accountID[:projectID]`.

use crate::error::TenantError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the tenant token in datasource URL templates
pub const TENANT_PLACEHOLDER: &str = "{tenant}";

const SELECT_SEGMENT: &str = "/select/";

/// Tenant identifier made of an account id and an optional project id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TenantToken {
    pub account_id: u32,
    pub project_id: u32,
}

impl TenantToken {
    /// Create a token from its parts
    pub const fn new(account_id: u32, project_id: u32) -> Self {
        Self {
            account_id,
            project_id,
        }
    }

    /// Parse a token from `accountID[:projectID]`
    ///
    /// An empty string yields the default tenant `0`.
    pub fn parse(s: &str) -> Result<Self, TenantError> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        let (account, project) = match s.split_once(':') {
            Some((account, project)) => (account, Some(project)),
            None => (s, None),
        };

        let account_id = account
            .parse::<u32>()
            .map_err(|_| TenantError::InvalidAccountId(s.to_string()))?;
        let project_id = match project {
            Some(p) => p
                .parse::<u32>()
                .map_err(|_| TenantError::InvalidProjectId(s.to_string()))?,
            None => 0,
        };

        Ok(Self::new(account_id, project_id))
    }

    /// Find the tenant in a `/select/<tenant>/...` datasource URL
    ///
    /// Returns the token together with the URL where the tenant segment was
    /// replaced by [`TENANT_PLACEHOLDER`].
    pub fn find_in_url(url: &str) -> Result<(Self, String), TenantError> {
        let start = url
            .find(SELECT_SEGMENT)
            .map(|idx| idx + SELECT_SEGMENT.len())
            .ok_or_else(|| TenantError::NotInUrl(url.to_string()))?;

        let tail = &url[start..];
        let end = tail.find('/').unwrap_or(tail.len());
        let segment = &tail[..end];
        if segment.is_empty() {
            return Err(TenantError::NotInUrl(url.to_string()));
        }

        let token = Self::parse(segment)?;
        let template = format!("{}{}{}", &url[..start], TENANT_PLACEHOLDER, &tail[end..]);
        Ok((token, template))
    }

    /// Substitute this token into a URL template
    pub fn format_url(&self, template: &str) -> String {
        template.replace(TENANT_PLACEHOLDER, &self.to_string())
    }
}

impl fmt::Display for TenantToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.project_id != 0 {
            write!(f, "{}:{}", self.account_id, self.project_id)
        } else {
            write!(f, "{}", self.account_id)
        }
    }
}

impl std::str::FromStr for TenantToken {
    type Err = TenantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

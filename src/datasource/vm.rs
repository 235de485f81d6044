//! VictoriaMetrics/Prometheus instant-query client

use super::response;
use super::Querier;
use crate::domain::{HumanDuration, Metric, TenantToken};
use crate::error::QueryError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::{SystemTime, UNIX_EPOCH};

const QUERY_PATH: &str = "/api/v1/query?query=";

/// Basic-auth credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Instant-query client
///
/// With tenancy enabled the base URL must contain a `/select/<tenant>/`
/// segment. That tenant becomes the default and the segment is replaced
/// per query.
#[derive(Debug, Clone)]
pub struct VmStorage {
    client: Client,
    url: String,
    basic_auth: Option<BasicAuth>,
    look_back: HumanDuration,
    default_tenant: Option<TenantToken>,
}

impl VmStorage {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `QueryError::Tenant` if tenancy is enabled and the URL
    /// carries no tenant segment
    pub fn new(
        base_url: &str,
        basic_auth: Option<BasicAuth>,
        tenancy: bool,
        look_back: HumanDuration,
        client: Client,
    ) -> Result<Self, QueryError> {
        let mut url = base_url.trim_end_matches('/').to_string();
        let mut default_tenant = None;

        if tenancy {
            let (token, template) = TenantToken::find_in_url(&url)?;
            default_tenant = Some(token);
            url = template;
        }

        Ok(Self {
            client,
            url,
            basic_auth,
            look_back,
            default_tenant,
        })
    }

    /// Whether queries are tenant-scoped
    pub fn tenancy(&self) -> bool {
        self.default_tenant.is_some()
    }

    /// Tenant used when a query names none
    pub fn default_tenant(&self) -> Option<TenantToken> {
        self.default_tenant
    }

    /// Build the query URL as of `now`
    pub fn request_url(&self, tenant: Option<&TenantToken>, query: &str, now: SystemTime) -> String {
        let base = match self.default_tenant.as_ref() {
            Some(default) => tenant.unwrap_or(default).format_url(&self.url),
            None => self.url.clone(),
        };

        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let mut url = format!("{}{}{}", base, QUERY_PATH, encoded);

        if !self.look_back.is_zero() {
            let at = now
                .checked_sub(self.look_back.as_std())
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            url.push_str(&format!("&time={}", at));
        }
        url
    }
}

impl Querier for VmStorage {
    fn query(&self, tenant: Option<&TenantToken>, query: &str) -> Result<Vec<Metric>, QueryError> {
        let raw_url = self.request_url(tenant, query, SystemTime::now());
        let url = url::Url::parse(&raw_url).map_err(|source| QueryError::Url {
            url: raw_url.clone(),
            source,
        })?;
        log::debug!("POST {}", url);

        let mut request = self.client.post(url).header(CONTENT_TYPE, "application/json");
        if let Some(auth) = self.basic_auth.as_ref().filter(|a| !a.password.is_empty()) {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let transport = |source| QueryError::Transport {
            url: raw_url.clone(),
            source,
        };
        let resp = request.send().map_err(transport)?;
        let status = resp.status();
        let body = resp.text().map_err(transport)?;

        if status != StatusCode::OK {
            return Err(QueryError::UnexpectedStatus {
                status: status.as_u16(),
                url: raw_url,
                body,
            });
        }
        response::decode(&body, &raw_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn storage(url: &str, tenancy: bool, look_back: HumanDuration) -> VmStorage {
        VmStorage::new(url, None, tenancy, look_back, Client::new()).unwrap()
    }

    #[test]
    fn test_request_url_plain() {
        let s = storage("http://vm:8428/", false, HumanDuration::ZERO);
        assert!(!s.tenancy());
        assert_eq!(
            s.request_url(None, "up == 0", UNIX_EPOCH),
            "http://vm:8428/api/v1/query?query=up+%3D%3D+0"
        );
    }

    #[test]
    fn test_request_url_look_back() {
        let s = storage("http://vm:8428", false, HumanDuration::from_secs(30));
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_030);
        assert_eq!(
            s.request_url(None, "up", now),
            "http://vm:8428/api/v1/query?query=up&time=1700000000"
        );
    }

    #[test]
    fn test_request_url_tenancy() {
        let s = storage("http://vmselect:8481/select/5/prometheus", true, HumanDuration::ZERO);
        assert_eq!(s.default_tenant(), Some(TenantToken::new(5, 0)));
        assert_eq!(
            s.request_url(None, "up", UNIX_EPOCH),
            "http://vmselect:8481/select/5/prometheus/api/v1/query?query=up"
        );
        assert_eq!(
            s.request_url(Some(&TenantToken::new(3, 1)), "up", UNIX_EPOCH),
            "http://vmselect:8481/select/3:1/prometheus/api/v1/query?query=up"
        );
    }

    #[test]
    fn test_tenancy_requires_tenant_segment() {
        let res = VmStorage::new("http://vm:8428", None, true, HumanDuration::ZERO, Client::new());
        assert!(matches!(res, Err(QueryError::Tenant(_))));
    }

    #[test]
    fn test_tenant_override_ignored_without_tenancy() {
        let s = storage("http://vm:8428", false, HumanDuration::ZERO);
        assert_eq!(
            s.request_url(Some(&TenantToken::new(3, 0)), "up", UNIX_EPOCH),
            "http://vm:8428/api/v1/query?query=up"
        );
    }
}

//! Datasource access
//!
//! Instant queries against a Prometheus-compatible query API.

pub mod response;
pub mod vm;

pub use vm::{BasicAuth, VmStorage};

use crate::domain::{Metric, TenantToken};
use crate::error::QueryError;

/// Something that can run an instant query
///
/// Implemented by [`VmStorage`].
pub trait Querier: Send + Sync {
    /// Run `query`, optionally on behalf of a specific tenant
    fn query(&self, tenant: Option<&TenantToken>, query: &str) -> Result<Vec<Metric>, QueryError>;
}

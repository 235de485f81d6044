//! Domain models for ruleconf
//!
//! This module contains value types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod duration;
pub mod metric;
pub mod tenant;

pub use duration::HumanDuration;
pub use metric::{Label, Metric};
pub use tenant::{TenantToken, TENANT_PLACEHOLDER};

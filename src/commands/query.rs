//! Query command implementation
//!
//! Runs one instant query against the configured datasource.

use crate::cli::args::{OutputFormat, QueryArgs};
use crate::cli::output::{print_output, QueryResult};
use crate::datasource::{BasicAuth, Querier, VmStorage};
use crate::domain::TenantToken;
use crate::error::{AppError, Result};
use crate::settings::{DatasourceSettings, SettingsBuilder};
use reqwest::blocking::Client;

/// Execute the query command
pub fn run_query(args: &QueryArgs, format: OutputFormat, config: Option<&str>) -> Result<()> {
    let settings = SettingsBuilder::new()
        .with_file(config)?
        .with_url(args.url.clone())
        .with_tenancy(args.tenancy)
        .with_lookback(args.lookback)
        .with_basic_auth(args.basic_auth_user.clone(), args.basic_auth_password.clone())
        .build();

    let storage = build_storage(&settings.datasource)?;
    let result = execute(&storage, args.tenant.as_ref(), &args.expr)?;
    print_output(&result, format)?;

    Ok(())
}

/// Run one query through `querier`
pub fn execute(querier: &dyn Querier, tenant: Option<&TenantToken>, expr: &str) -> Result<QueryResult> {
    let samples = querier.query(tenant, expr)?;
    log::debug!("{} sample(s) for {}", samples.len(), expr);
    Ok(QueryResult {
        query: expr.to_string(),
        samples,
    })
}

/// Create a datasource client from settings
pub fn build_storage(settings: &DatasourceSettings) -> Result<VmStorage> {
    let url = settings
        .url
        .as_deref()
        .ok_or_else(|| AppError::MissingSetting("datasource url (--url or [datasource].url)".to_string()))?;

    let basic_auth = if settings.basic_auth_password.is_empty() {
        None
    } else {
        Some(BasicAuth::new(
            settings.basic_auth_user.clone(),
            settings.basic_auth_password.clone(),
        ))
    };

    let storage = VmStorage::new(
        url,
        basic_auth,
        settings.tenancy,
        settings.lookback,
        Client::new(),
    )?;
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Label, Metric};
    use crate::mock::StaticQuerier;

    #[test]
    fn test_execute_passes_tenant_and_expr() {
        let querier = StaticQuerier::new(vec![Metric {
            labels: vec![Label::new("job", "api")],
            timestamp: 1_700_000_000,
            value: 0.0,
        }]);
        let tenant = TenantToken::new(2, 0);

        let result = execute(&querier, Some(&tenant), "up == 0").unwrap();
        assert_eq!(result.query, "up == 0");
        assert_eq!(result.samples.len(), 1);
        assert_eq!(querier.calls(), vec![(Some(tenant), "up == 0".to_string())]);
    }

    #[test]
    fn test_build_storage_requires_url() {
        let err = build_storage(&DatasourceSettings::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingSetting(_)));
    }

    #[test]
    fn test_build_storage_tenancy() {
        let settings = DatasourceSettings {
            url: Some("http://vm/select/4/prometheus".to_string()),
            tenancy: true,
            ..DatasourceSettings::default()
        };
        let storage = build_storage(&settings).unwrap();
        assert!(storage.tenancy());

        let bad = DatasourceSettings {
            url: Some("http://vm:8428".to_string()),
            tenancy: true,
            ..DatasourceSettings::default()
        };
        assert!(matches!(build_storage(&bad), Err(AppError::Query(_))));
    }
}

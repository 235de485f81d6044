//! Query API response decoding

use crate::domain::{Label, Metric};
use crate::error::QueryError;
use serde::Deserialize;
use std::collections::HashMap;

const STATUS_SUCCESS: &str = "success";
const STATUS_ERROR: &str = "error";
const RESULT_TYPE_VECTOR: &str = "vector";

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: ResponseData,
    #[serde(default, rename = "errorType")]
    error_type: String,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseData {
    #[serde(default, rename = "resultType")]
    result_type: String,
    #[serde(default)]
    result: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    #[serde(default)]
    metric: HashMap<String, String>,
    /// `[unix_seconds, "value"]`
    value: (f64, String),
}

/// Decode an instant-query body into samples
///
/// `url` is only used for error context.
pub fn decode(body: &str, url: &str) -> Result<Vec<Metric>, QueryError> {
    let response: Response = serde_json::from_str(body).map_err(|source| QueryError::Decode {
        url: url.to_string(),
        source,
    })?;

    match response.status.as_str() {
        STATUS_SUCCESS => {}
        STATUS_ERROR => {
            return Err(QueryError::Response {
                url: url.to_string(),
                error_type: response.error_type,
                error: response.error,
            })
        }
        other => return Err(QueryError::UnknownStatus(other.to_string())),
    }
    if response.data.result_type != RESULT_TYPE_VECTOR {
        return Err(QueryError::UnexpectedResultType(response.data.result_type));
    }

    response
        .data
        .result
        .into_iter()
        .map(|sample| {
            let (timestamp, raw_value) = sample.value;
            let value = raw_value
                .parse::<f64>()
                .map_err(|source| QueryError::InvalidValue {
                    metric: format!("{:?}", sample.metric),
                    value: raw_value.clone(),
                    source,
                })?;
            Ok(Metric {
                labels: sample
                    .metric
                    .into_iter()
                    .map(|(name, value)| Label { name, value })
                    .collect(),
                timestamp: timestamp as i64,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://vm/api/v1/query?query=up";

    #[test]
    fn test_decode_vector() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[{"metric":{"instance":"h1"},"value":[1700000000,"1.5"]}]}}"#;
        let metrics = decode(body, URL).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].timestamp, 1_700_000_000);
        assert_eq!(metrics[0].value, 1.5);
        assert!(metrics[0].labels.contains(&Label::new("instance", "h1")));
    }

    #[test]
    fn test_decode_truncates_fractional_timestamp() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[{"metric":{},"value":[1700000000.987,"2"]}]}}"#;
        let metrics = decode(body, URL).unwrap();
        assert_eq!(metrics[0].timestamp, 1_700_000_000);
        assert!(metrics[0].labels.is_empty());
    }

    #[test]
    fn test_decode_multiple_labels() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[{"metric":{"__name__":"up","job":"node","instance":"h2"},"value":[1,"0"]}]}}"#;
        let metrics = decode(body, URL).unwrap();
        let mut labels = metrics[0].labels.clone();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            labels,
            vec![
                Label::new("__name__", "up"),
                Label::new("instance", "h2"),
                Label::new("job", "node"),
            ]
        );
    }

    #[test]
    fn test_decode_empty_result() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[]}}"#;
        assert!(decode(body, URL).unwrap().is_empty());
    }

    #[test]
    fn test_decode_error_status() {
        let body = r#"{"status":"error","errorType":"bad_data","error":"parse error"}"#;
        match decode(body, URL) {
            Err(QueryError::Response { error_type, error, .. }) => {
                assert_eq!(error_type, "bad_data");
                assert_eq!(error, "parse error");
            }
            other => panic!("expected response error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_status() {
        let body = r#"{"status":"pending","data":{"resultType":"vector","result":[]}}"#;
        assert!(matches!(decode(body, URL), Err(QueryError::UnknownStatus(s)) if s == "pending"));
    }

    #[test]
    fn test_decode_unexpected_result_type() {
        let body = r#"{"status":"success","data":{"resultType":"matrix","result":[]}}"#;
        assert!(matches!(
            decode(body, URL),
            Err(QueryError::UnexpectedResultType(t)) if t == "matrix"
        ));
    }

    #[test]
    fn test_decode_bad_value() {
        let body = r#"{"status":"success","data":{"resultType":"vector","result":[{"metric":{},"value":[1,"abc"]}]}}"#;
        assert!(matches!(decode(body, URL), Err(QueryError::InvalidValue { .. })));
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(matches!(decode("{not json", URL), Err(QueryError::Decode { .. })));
    }
}

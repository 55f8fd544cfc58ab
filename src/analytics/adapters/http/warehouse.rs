//! BigQuery `jobs.query` REST adapter for the warehouse port.

use super::{AdapterConfigError, optional_env, required_env};
use crate::analytics::domain::ResultSet;
use crate::analytics::ports::{Warehouse, WarehouseError, WarehouseResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Configuration for the BigQuery adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigQueryConfig {
    project_id: String,
    access_token: String,
    endpoint: String,
    timeout_ms: u64,
}

impl BigQueryConfig {
    /// Creates a configuration with the default endpoint and timeout.
    #[must_use]
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the service endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// Requires `GCP_PROJECT_ID` and `BIGQUERY_ACCESS_TOKEN`; honours
    /// `BIGQUERY_API_ENDPOINT` when set. Token acquisition itself is the
    /// caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterConfigError::MissingVariable`] naming the first
    /// unset variable.
    pub fn from_env() -> Result<Self, AdapterConfigError> {
        let project_id = required_env("GCP_PROJECT_ID")?;
        let access_token = required_env("BIGQUERY_ACCESS_TOKEN")?;
        let mut config = Self::new(project_id, access_token);
        if let Some(endpoint) = optional_env("BIGQUERY_API_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryJobRequest {
    query: String,
    use_legacy_sql: bool,
}

#[derive(Debug, Deserialize)]
struct FieldSchema {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    #[serde(default)]
    fields: Vec<FieldSchema>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    #[serde(default)]
    v: Value,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct JobError {
    reason: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryJobResponse {
    #[serde(default)]
    job_complete: bool,
    schema: Option<TableSchema>,
    #[serde(default)]
    rows: Vec<TableRow>,
    #[serde(default)]
    errors: Vec<JobError>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<JobError>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Warehouse adapter over the BigQuery `jobs.query` REST surface.
///
/// Submits synchronous query jobs and materializes the returned rows,
/// coercing cell text by the declared column type.
#[derive(Debug, Clone)]
pub struct BigQueryWarehouse {
    client: Client,
    config: BigQueryConfig,
}

impl BigQueryWarehouse {
    /// Creates an adapter with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterConfigError::HttpClient`] when the client cannot be
    /// constructed.
    pub fn new(config: BigQueryConfig) -> Result<Self, AdapterConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| AdapterConfigError::HttpClient(err.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Warehouse for BigQueryWarehouse {
    async fn run_query(&self, sql: &str) -> WarehouseResult<ResultSet> {
        let url = format!(
            "{}/projects/{}/queries",
            self.config.endpoint, self.config.project_id
        );
        let body = QueryJobRequest {
            query: sql.to_owned(),
            use_legacy_sql: false,
        };

        debug!(project = %self.config.project_id, "submitting query job");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|err| WarehouseError::Request(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| WarehouseError::Request(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            warn!(%status, "query job rejected");
            return Err(map_error_status(status, &text));
        }

        let parsed: QueryJobResponse = serde_json::from_str(&text)
            .map_err(|err| WarehouseError::Request(format!("malformed response: {err}")))?;

        if let Some(job_error) = parsed.errors.first() {
            return Err(map_job_error(job_error));
        }
        if !parsed.job_complete {
            return Err(WarehouseError::TimedOut(
                "query job did not complete within the request deadline".to_owned(),
            ));
        }

        let fields = parsed.schema.map_or_else(Vec::new, |schema| schema.fields);
        let columns = fields.iter().map(|field| field.name.clone()).collect();
        let mut rows = Vec::with_capacity(parsed.rows.len());
        for row in parsed.rows {
            let cells = fields
                .iter()
                .zip(row.f)
                .map(|(field, cell)| coerce_cell(&cell.v, &field.field_type))
                .collect();
            rows.push(cells);
        }
        ResultSet::new(columns, rows).map_err(|err| WarehouseError::Request(err.to_string()))
    }
}

/// Maps a non-success HTTP status and body onto a structured error.
fn map_error_status(status: StatusCode, body: &str) -> WarehouseError {
    let (message, reason) = serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| (body.to_owned(), None),
        |parsed| {
            let first_reason = parsed
                .error
                .errors
                .into_iter()
                .next()
                .and_then(|job_error| job_error.reason);
            (parsed.error.message, first_reason)
        },
    );
    match reason.as_deref() {
        Some("invalidQuery") => WarehouseError::InvalidQuery(message),
        Some("accessDenied") => WarehouseError::PermissionDenied(message),
        Some("timeout") => WarehouseError::TimedOut(message),
        _ if status == StatusCode::BAD_REQUEST => WarehouseError::InvalidQuery(message),
        _ if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
            WarehouseError::PermissionDenied(message)
        }
        _ => WarehouseError::Request(format!("status {status}: {message}")),
    }
}

/// Maps an in-body job error onto a structured error.
fn map_job_error(job_error: &JobError) -> WarehouseError {
    let message = job_error
        .message
        .clone()
        .unwrap_or_else(|| "query job reported an error".to_owned());
    match job_error.reason.as_deref() {
        Some("invalidQuery") => WarehouseError::InvalidQuery(message),
        Some("accessDenied") => WarehouseError::PermissionDenied(message),
        Some("timeout") => WarehouseError::TimedOut(message),
        _ => WarehouseError::Request(message),
    }
}

/// Coerces a wire cell (string-encoded by the API) by its declared type.
fn coerce_cell(value: &Value, field_type: &str) -> Value {
    let Value::String(text) = value else {
        return value.clone();
    };
    match field_type {
        "INTEGER" | "INT64" => text
            .parse::<i64>()
            .map_or_else(|_| Value::String(text.clone()), Value::from),
        "FLOAT" | "FLOAT64" => text
            .parse::<f64>()
            .map_or_else(|_| Value::String(text.clone()), Value::from),
        "BOOLEAN" | "BOOL" => text
            .parse::<bool>()
            .map_or_else(|_| Value::String(text.clone()), Value::from),
        "TIMESTAMP" => parse_epoch_timestamp(text)
            .map_or_else(|| Value::String(text.clone()), Value::String),
        _ => Value::String(text.clone()),
    }
}

/// Renders a fractional-epoch-seconds timestamp cell as RFC 3339.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "the wire format encodes timestamps as fractional epoch seconds"
)]
fn parse_epoch_timestamp(text: &str) -> Option<String> {
    let seconds = text.parse::<f64>().ok()?;
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1_000_000_000.0) as u32;
    let timestamp: DateTime<Utc> = DateTime::from_timestamp(whole as i64, nanos)?;
    Some(timestamp.to_rfc3339())
}

//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::PartnerTable;
use crate::error::AppError;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Outcome of a single component check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Ok,
    Error,
}

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    pub fn new(data_source: DataSourceCheck) -> Self {
        let status = match data_source.status {
            CheckState::Ok => HealthStatus::Healthy,
            CheckState::Error => HealthStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { data_source },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub data_source: DataSourceCheck,
}

/// State of the partner data file.
///
/// A loaded table reports its row count and load time; a failed load
/// reports the error message instead.
#[derive(Debug, Serialize)]
pub struct DataSourceCheck {
    pub status: CheckState,
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataSourceCheck {
    pub fn loaded(table: &PartnerTable) -> Self {
        Self {
            status: CheckState::Ok,
            source: table.source.clone(),
            partners: Some(table.len()),
            loaded_at: Some(table.loaded_at),
            error: None,
        }
    }

    pub fn failed(source: String, error: &AppError) -> Self {
        Self {
            status: CheckState::Error,
            source,
            partners: None,
            loaded_at: None,
            error: Some(error.to_string()),
        }
    }
}

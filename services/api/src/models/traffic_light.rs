//! Traffic-light issue model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// New traffic-light issue document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrafficLightIssue {
    pub location: String,
    pub issue_type: String,
    pub description: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields changed by a status update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// Request for reporting a traffic-light issue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTrafficLightRequest {
    pub location: Option<String>,
    pub issue_type: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Request for updating a traffic-light issue status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Response for a reported traffic-light issue
#[derive(Debug, Serialize)]
pub struct ReportTrafficLightResponse {
    pub message: String,
    pub id: Uuid,
}

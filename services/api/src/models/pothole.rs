//! Pothole report model and related payloads

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordinal classification of pothole impact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!(
                "Invalid severity '{}': expected low, medium or high",
                other
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(name)
    }
}

/// New pothole document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPothole {
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Severity,
    pub description: String,
    pub status: String,
    pub reported_at: DateTime<Utc>,
}

/// Request for reporting a pothole
#[derive(Debug, Deserialize)]
pub struct ReportPotholeRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub severity: Option<String>,
    pub description: Option<String>,
}

/// Response for a reported pothole
#[derive(Debug, Serialize)]
pub struct ReportPotholeResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

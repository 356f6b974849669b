//! API models for stored documents and request/response payloads

pub mod pothole;
pub mod traffic_light;
pub mod user;

use serde::Serialize;

/// Status given to every new report
pub const DEFAULT_STATUS: &str = "reported";

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement body carrying a success flag
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

use serde::{Deserialize, Serialize};

use crate::models::{Identity, ReportStatus};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `token` is the handle for later requests. Registered users get a
/// persisted session token; the administrator gets a process-local one.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub identity: Identity,
}

/// Generic `{"message": ...}` envelope for operations whose only payload
/// is a human-readable confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// -- Reports --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateReportRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub division: String,
    pub district: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub status: ReportStatus,
}

/// Status counts over a report set. Derived on demand, never stored.
#[derive(Debug, Default, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

// -- Reference data --

/// Looked-up coordinates. Both fields are `null` when the place is not in
/// the reference tables.
#[derive(Debug, Serialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

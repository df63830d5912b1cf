use serde::{Deserialize, Serialize};
use crate::models::domain::Listing;

/// Response for a successful estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    #[serde(rename = "carName")]
    pub car_name: String,
    pub mileage: Option<i64>,
    pub estimate: i64,
    #[serde(rename = "totalComparables")]
    pub total_comparables: usize,
    pub results: Vec<Listing>,
}

/// Response for a query that could not be appraised
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormErrorResponse {
    pub error: String,
    pub messages: Vec<String>,
    #[serde(rename = "carName", skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

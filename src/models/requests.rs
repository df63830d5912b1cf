use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to estimate the value of a car
///
/// Accepted both as JSON and as a url-encoded form body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstimateRequest {
    #[validate(length(max = 200))]
    #[serde(alias = "carName", rename = "car_name", default)]
    pub car_name: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub mileage: String,
}

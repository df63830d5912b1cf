// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{VehicleQuery, Listing, Catalog, MarketRecord, EstimationSettings};
pub use requests::EstimateRequest;
pub use responses::{EstimateResponse, FormErrorResponse, HealthResponse, ErrorResponse};

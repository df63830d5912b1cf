//! Carvalue - used car value estimation
//!
//! Validates free-text "year make model" queries against a catalog of known
//! makes and models, then estimates a value from comparable market listings.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Appraiser, QueryOutcome, ValidationError, estimate, resolve, validate};
pub use models::{VehicleQuery, Listing, Catalog, EstimationSettings, EstimateRequest, EstimateResponse};

// Core algorithm exports
pub mod appraiser;
pub mod catalog;
pub mod estimator;
pub mod validator;

pub use appraiser::{Appraisal, Appraiser, QueryOutcome};
pub use catalog::resolve;
pub use estimator::{estimate, fit_price_on_mileage, RegressionLine};
pub use validator::{parse_mileage, validate, ValidationError};

use crate::core::{estimator::estimate, validator::validate};
use crate::models::{Catalog, EstimationSettings, Listing, VehicleQuery};
use crate::services::storage::{StorageError, StorageReader};

/// A successful appraisal
#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub query: VehicleQuery,
    pub car_name: String,
    pub mileage: Option<i64>,
    pub estimate: i64,
    /// Number of comparables the estimate was computed from
    pub total_comparables: usize,
    /// Comparables for display, capped at `max_results`
    pub listings: Vec<Listing>,
}

/// Result of appraising a raw query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    ValidationErrors(Vec<String>),
    NoDataFound { car_name: String },
    Success(Appraisal),
}

/// Turns raw form input into a value estimate
///
/// # Pipeline Stages
/// 1. Catalog refresh from storage
/// 2. Query validation
/// 3. Comparable lookup
/// 4. Estimation over every comparable, display list truncated
#[derive(Debug, Clone, Default)]
pub struct Appraiser {
    settings: EstimationSettings,
}

impl Appraiser {
    pub fn new(settings: EstimationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EstimationSettings {
        &self.settings
    }

    /// Appraise a raw car description and mileage
    ///
    /// Bad input and missing data are reported in the outcome; only storage
    /// failures are returned as errors.
    pub async fn handle_query<S>(
        &self,
        storage: &S,
        raw_car: &str,
        raw_mileage: &str,
    ) -> Result<QueryOutcome, StorageError>
    where
        S: StorageReader + ?Sized,
    {
        let catalog = Catalog::new(storage.get_makes().await?, storage.get_models().await?);

        let query = match validate(raw_car, raw_mileage, &catalog, &self.settings) {
            Ok(query) => query,
            Err(e) => {
                tracing::info!("Rejected query {:?} (mileage {:?}): {}", raw_car, raw_mileage, e);
                return Ok(QueryOutcome::ValidationErrors(vec![e.to_string()]));
            }
        };

        let listings = storage
            .get_listings(query.year, &query.make, &query.model)
            .await?;

        Ok(self.appraise(query, listings))
    }

    /// Estimate a validated query from its comparables
    pub fn appraise(&self, query: VehicleQuery, mut listings: Vec<Listing>) -> QueryOutcome {
        let car_name = query.display_name();

        let Some(value) = estimate(&listings, query.mileage) else {
            tracing::info!("No comparables for {}", query);
            return QueryOutcome::NoDataFound { car_name };
        };

        let total_comparables = listings.len();
        listings.truncate(self.settings.max_results);

        tracing::debug!(
            "Estimated {} at {} from {} comparables",
            query,
            value,
            total_comparables
        );

        QueryOutcome::Success(Appraisal {
            car_name,
            mileage: query.mileage,
            estimate: value,
            total_comparables,
            listings,
            query,
        })
    }
}

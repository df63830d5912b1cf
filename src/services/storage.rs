use crate::models::{Listing, MarketRecord};
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur when reading or writing market data
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Read access to the catalog and comparable listings
#[async_trait]
pub trait StorageReader: Send + Sync {
    /// Distinct known makes, lower-cased
    async fn get_makes(&self) -> Result<HashSet<String>, StorageError>;

    /// Distinct known models, lower-cased
    async fn get_models(&self) -> Result<HashSet<String>, StorageError>;

    /// Listings with this exact year and case-insensitively matching make and
    /// model. Rows with any missing field are left out.
    async fn get_listings(
        &self,
        year: i32,
        make: &str,
        model: &str,
    ) -> Result<Vec<Listing>, StorageError>;

    /// Whether the backing store is reachable
    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(true)
    }
}

/// Market data held in memory
///
/// Follows the same matching rules as the PostgreSQL reader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    records: Vec<MarketRecord>,
}

impl InMemoryStorage {
    pub fn new(records: Vec<MarketRecord>) -> Self {
        Self { records }
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let records = listings
            .into_iter()
            .map(|l| MarketRecord {
                vin: l.vin,
                year: l.year,
                make: Some(l.make),
                model: Some(l.model),
                trim: Some(l.trim),
                price: Some(l.price),
                mileage: Some(l.mileage),
                dealer_city: Some(l.dealer_city),
                dealer_state: Some(l.dealer_state),
            })
            .collect();

        Self { records }
    }

    fn distinct_lowercase<F>(&self, field: F) -> HashSet<String>
    where
        F: Fn(&MarketRecord) -> Option<&String>,
    {
        self.records
            .iter()
            .filter_map(|r| field(r))
            .map(|v| v.to_lowercase())
            .collect()
    }
}

#[async_trait]
impl StorageReader for InMemoryStorage {
    async fn get_makes(&self) -> Result<HashSet<String>, StorageError> {
        Ok(self.distinct_lowercase(|r| r.make.as_ref()))
    }

    async fn get_models(&self) -> Result<HashSet<String>, StorageError> {
        Ok(self.distinct_lowercase(|r| r.model.as_ref()))
    }

    async fn get_listings(
        &self,
        year: i32,
        make: &str,
        model: &str,
    ) -> Result<Vec<Listing>, StorageError> {
        let make = make.to_lowercase();
        let model = model.to_lowercase();

        let listings = self
            .records
            .iter()
            .filter(|r| r.year == year)
            .filter(|r| r.make.as_deref().map(str::to_lowercase).as_deref() == Some(make.as_str()))
            .filter(|r| r.model.as_deref().map(str::to_lowercase).as_deref() == Some(model.as_str()))
            .cloned()
            .filter_map(MarketRecord::into_listing)
            .filter(|l| l.price >= 0 && l.mileage >= 0)
            .collect();

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vin: &str, make: &str, model: &str, price: Option<i64>) -> MarketRecord {
        MarketRecord {
            vin: vin.to_string(),
            year: 2016,
            make: Some(make.to_string()),
            model: Some(model.to_string()),
            trim: Some("SE".to_string()),
            price,
            mileage: Some(30000),
            dealer_city: Some("Denver".to_string()),
            dealer_state: Some("CO".to_string()),
        }
    }

    #[test]
    fn test_catalog_is_lowercased() {
        let storage = InMemoryStorage::new(vec![
            record("A1", "Land Rover", "Discovery", Some(30000)),
            record("A2", "TOYOTA", "Corolla", Some(12000)),
        ]);

        let makes = tokio_test::block_on(storage.get_makes()).unwrap();
        let models = tokio_test::block_on(storage.get_models()).unwrap();

        assert!(makes.contains("land rover"));
        assert!(makes.contains("toyota"));
        assert!(models.contains("discovery"));
        assert!(models.contains("corolla"));
    }

    #[test]
    fn test_listings_match_case_insensitively_and_drop_nulls() {
        let storage = InMemoryStorage::new(vec![
            record("A1", "Toyota", "Corolla", Some(12000)),
            record("A2", "toyota", "COROLLA", Some(11000)),
            record("A3", "Toyota", "Corolla", None),
            record("A4", "Toyota", "Camry", Some(15000)),
        ]);

        let listings = tokio_test::block_on(storage.get_listings(2016, "toyota", "corolla")).unwrap();
        let vins: Vec<&str> = listings.iter().map(|l| l.vin.as_str()).collect();
        assert_eq!(vins, vec!["A1", "A2"]);

        let none = tokio_test::block_on(storage.get_listings(2017, "toyota", "corolla")).unwrap();
        assert!(none.is_empty());
    }
}

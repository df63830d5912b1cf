use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A validated "year make model" query, with optional mileage
///
/// Make and model are always lower-cased and drawn from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub mileage: Option<i64>,
}

impl VehicleQuery {
    /// Human readable name, with make and model title-cased
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, title_case(&self.make), title_case(&self.model))
    }
}

/// Canonical lower-case "year make model" form, accepted back by the validator
impl fmt::Display for VehicleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A comparable market listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: String,
    #[serde(rename = "listingPrice")]
    pub price: i64,
    #[serde(rename = "listingMileage")]
    pub mileage: i64,
    #[serde(rename = "dealerCity")]
    pub dealer_city: String,
    #[serde(rename = "dealerState")]
    pub dealer_state: String,
}

/// Known makes and models, lower-cased
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub makes: HashSet<String>,
    pub models: HashSet<String>,
}

impl Catalog {
    pub fn new(makes: HashSet<String>, models: HashSet<String>) -> Self {
        Self { makes, models }
    }
}

/// One row of a market data file
///
/// Everything but the VIN and year may be missing in the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRecord {
    pub vin: String,
    pub year: i32,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub dealer_city: Option<String>,
    pub dealer_state: Option<String>,
}

impl MarketRecord {
    /// Convert into a listing, or `None` if any field is missing
    pub fn into_listing(self) -> Option<Listing> {
        Some(Listing {
            vin: self.vin,
            year: self.year,
            make: self.make?,
            model: self.model?,
            trim: self.trim?,
            price: self.price?,
            mileage: self.mileage?,
            dealer_city: self.dealer_city?,
            dealer_state: self.dealer_state?,
        })
    }
}

/// Bounds and limits applied while appraising a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationSettings {
    pub min_year: i32,
    pub max_year: i32,
    pub max_results: usize,
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self {
            min_year: 1980,
            max_year: 2025,
            max_results: 100,
        }
    }
}

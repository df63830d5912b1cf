use crate::models::MarketRecord;
use crate::services::postgres::PostgresClient;
use crate::services::storage::StorageError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a market data file
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(#[from] StorageError),
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_inserted: u64,
    pub rows_skipped: usize,
    pub duplicates: u64,
}

/// Records parsed from a market data file
#[derive(Debug, Clone, Default)]
pub struct ParsedMarketData {
    pub records: Vec<MarketRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Column positions, resolved from the header row
struct Columns {
    vin: usize,
    year: usize,
    make: Option<usize>,
    model: Option<usize>,
    trim: Option<usize>,
    price: Option<usize>,
    mileage: Option<usize>,
    dealer_city: Option<usize>,
    dealer_state: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Ok(Self {
            vin: find(&["vin"]).ok_or(IngestError::MissingColumn("vin"))?,
            year: find(&["year"]).ok_or(IngestError::MissingColumn("year"))?,
            make: find(&["make"]),
            model: find(&["model"]),
            trim: find(&["trim"]),
            price: find(&["listing_price", "price"]),
            mileage: find(&["listing_mileage", "mileage"]),
            dealer_city: find(&["dealer_city"]),
            dealer_state: find(&["dealer_state"]),
        })
    }
}

/// Parse market data: `|`-delimited, header row first
///
/// Literal `"` characters are dropped before parsing. Rows without a VIN or a
/// whole-number year are skipped. Empty or unreadable prices and mileages
/// become missing values; fractional ones are truncated.
pub fn parse_market_data(data: &str) -> Result<ParsedMarketData, IngestError> {
    let cleaned = data.replace('"', "");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(cleaned.as_bytes());

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut parsed = ParsedMarketData::default();

    for row in reader.records() {
        let row = row?;
        parsed.rows_read += 1;

        match record_from_row(&row, &columns) {
            Some(record) => parsed.records.push(record),
            None => {
                parsed.rows_skipped += 1;
                tracing::debug!("Skipping row {}: missing VIN or year", parsed.rows_read);
            }
        }
    }

    Ok(parsed)
}

/// Read and parse a market data file
pub fn read_market_data_file<P: AsRef<Path>>(path: P) -> Result<ParsedMarketData, IngestError> {
    let data = fs::read_to_string(path)?;
    parse_market_data(&data)
}

/// Load a market data file into PostgreSQL
pub async fn load_market_data_file<P: AsRef<Path>>(
    path: P,
    client: &PostgresClient,
) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    tracing::info!("Processing market data file: {}", path.display());

    let parsed = read_market_data_file(path)?;
    let rows_inserted = client.insert_records(&parsed.records).await?;

    let report = IngestReport {
        rows_read: parsed.rows_read,
        rows_inserted,
        rows_skipped: parsed.rows_skipped,
        duplicates: parsed.records.len() as u64 - rows_inserted,
    };

    tracing::info!(
        "Loaded {} rows ({} skipped, {} duplicates) from {}",
        report.rows_inserted,
        report.rows_skipped,
        report.duplicates,
        path.display()
    );

    Ok(report)
}

fn record_from_row(row: &csv::StringRecord, columns: &Columns) -> Option<MarketRecord> {
    let text = |index: Option<usize>| {
        index
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let number = |index: Option<usize>| {
        text(index)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
    };

    let vin = text(Some(columns.vin))?;
    let year = text(Some(columns.year))?.parse::<i32>().ok()?;

    Some(MarketRecord {
        vin,
        year,
        make: text(columns.make),
        model: text(columns.model),
        trim: text(columns.trim),
        price: number(columns.price),
        mileage: number(columns.mileage),
        dealer_city: text(columns.dealer_city),
        dealer_state: text(columns.dealer_state),
    })
}

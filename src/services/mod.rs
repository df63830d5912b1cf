// Service exports
pub mod ingest;
pub mod postgres;
pub mod storage;

pub use ingest::{IngestError, IngestReport, ParsedMarketData, load_market_data_file, parse_market_data, read_market_data_file};
pub use postgres::PostgresClient;
pub use storage::{InMemoryStorage, StorageError, StorageReader};

pub mod csv_loader;

pub use csv_loader::{load_raw_records, parse_raw_records, write_rows};

pub mod record_loader;

pub use record_loader::{load_records_file, parse_records, read_records_from_stdin};

//! Dataset loading
//!
//! Turns a CSV file into the Cases a docket runs over.

mod csv_loader;

pub use csv_loader::{CsvCaseLoader, DataLoadError};

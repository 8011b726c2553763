//! Infrastructure layer for claim-jury
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and dataset loading.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat};
pub use dataset::{CsvCaseLoader, DataLoadError};
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiGateway;

//! CSV case loader
//!
//! Reads a headered CSV, drops rows whose fact or claim is missing or blank,
//! then applies the [`CaseSelection`] to the surviving rows. Case ids are the
//! original 0-based data row indices (header excluded).

use jury_domain::{Case, CaseSelection, DomainError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that prevent a dataset from being used
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset {path} has no column '{column}' (found: {found})")]
    MissingColumn {
        path: PathBuf,
        column: String,
        found: String,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Row position {position} is out of range ({available} usable rows)")]
    SelectionOutOfRange { position: usize, available: usize },

    #[error("Invalid case: {0}")]
    InvalidCase(#[from] DomainError),
}

/// Loads cases from a CSV file with configurable column names
#[derive(Debug, Clone)]
pub struct CsvCaseLoader {
    internal_column: String,
    external_column: String,
}

impl Default for CsvCaseLoader {
    fn default() -> Self {
        Self::new("truth", "claim")
    }
}

impl CsvCaseLoader {
    pub fn new(internal_column: impl Into<String>, external_column: impl Into<String>) -> Self {
        Self {
            internal_column: internal_column.into(),
            external_column: external_column.into(),
        }
    }

    /// Load the selected cases from `path`
    pub fn load(&self, path: &Path, selection: &CaseSelection) -> Result<Vec<Case>, DataLoadError> {
        let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cases = self.load_from_reader(file, path, selection)?;
        info!("Loaded {} cases from {}", cases.len(), path.display());
        Ok(cases)
    }

    /// Load from any reader; `path` is only used in error messages
    pub fn load_from_reader<R: std::io::Read>(
        &self,
        reader: R,
        path: &Path,
        selection: &CaseSelection,
    ) -> Result<Vec<Case>, DataLoadError> {
        let malformed = |source| DataLoadError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(malformed)?.clone();
        let internal_idx = self.column_index(&headers, &self.internal_column, path)?;
        let external_idx = self.column_index(&headers, &self.external_column, path)?;

        let mut usable = Vec::new();
        let mut dropped = 0usize;

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(malformed)?;
            let fact = record.get(internal_idx).map(str::trim).unwrap_or_default();
            let claim = record.get(external_idx).map(str::trim).unwrap_or_default();

            if fact.is_empty() || claim.is_empty() {
                dropped += 1;
                continue;
            }
            usable.push((row, fact.to_string(), claim.to_string()));
        }

        debug!(
            "{} usable rows, {} dropped for a missing fact or claim",
            usable.len(),
            dropped
        );

        let positions =
            selection
                .resolve(usable.len())
                .map_err(|position| DataLoadError::SelectionOutOfRange {
                    position,
                    available: usable.len(),
                })?;

        positions
            .into_iter()
            .map(|position| {
                let (row, fact, claim) = &usable[position];
                Case::try_new(*row, fact.clone(), claim.clone()).map_err(Into::into)
            })
            .collect()
    }

    fn column_index(
        &self,
        headers: &csv::StringRecord,
        column: &str,
        path: &Path,
    ) -> Result<usize, DataLoadError> {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
                found: headers.iter().collect::<Vec<_>>().join(", "),
            })
    }
}

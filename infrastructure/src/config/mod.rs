//! Configuration file loading for claim-jury
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CLAIM_JURY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./jury.toml` or `./.jury.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/claim-jury/config.toml`
//! 5. Fallback: `~/.config/claim-jury/config.toml`
//! 6. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDatasetConfig, FileExecutionConfig, FileJuryConfig,
    FileModelConfig, FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
    FileRoleConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};

pub mod app_config;
pub mod comparison;
pub mod config;
pub mod criteria;
pub mod display;
pub mod property;
pub mod search;

pub use app_config::{AppConfig, Environment, RecordSource};
pub use comparison::{ComparisonError, ComparisonRow, ComparisonSet, ToggleOutcome, MAX_COMPARED};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{parse_minimum, FilterCriteria, SortKey};
pub use property::{
    Coordinates, Location, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
    DEFAULT_COORDINATES, DEFAULT_TITLE, DEFAULT_YEAR_BUILT, PLACEHOLDER_IMAGE,
};
pub use search::{matches, search, sort_records};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

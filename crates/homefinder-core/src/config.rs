use crate::app_config::{AppConfig, Environment, RecordSource};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("HOMEFINDER_ENV", "development"))?;
    let log_level = or_default("HOMEFINDER_LOG_LEVEL", "info");

    let record_source = match or_default("HOMEFINDER_SOURCE", "bundled").as_str() {
        "bundled" => RecordSource::Bundled,
        "file" => RecordSource::File(PathBuf::from(require("HOMEFINDER_DATASET_PATH")?)),
        "remote" => RecordSource::Remote {
            base_url: require("HOMEFINDER_API_URL")?,
        },
        other => {
            return Err(ConfigError::InvalidEnvVar {
                var: "HOMEFINDER_SOURCE".to_string(),
                reason: format!("unknown source '{other}'; expected bundled, file or remote"),
            })
        }
    };
    let api_key = lookup("HOMEFINDER_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    let request_timeout_secs = parse_u64("HOMEFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let page_size = parse_u32("HOMEFINDER_PAGE_SIZE", "100")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "HOMEFINDER_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let data_dir = PathBuf::from(or_default("HOMEFINDER_DATA_DIR", "./.homefinder"));
    let search_debounce_ms = parse_u64("HOMEFINDER_SEARCH_DEBOUNCE_MS", "300")?;

    Ok(AppConfig {
        env,
        log_level,
        record_source,
        api_key,
        request_timeout_secs,
        page_size,
        data_dir,
        search_debounce_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HOMEFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

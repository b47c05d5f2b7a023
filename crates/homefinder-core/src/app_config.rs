use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where listing records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// The dataset compiled into `homefinder-records`.
    Bundled,
    /// A JSON array of listing rows on disk.
    File(PathBuf),
    /// A remote record-service API.
    Remote { base_url: String },
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Bundled => write!(f, "bundled"),
            RecordSource::File(path) => write!(f, "file({})", path.display()),
            RecordSource::Remote { base_url } => write!(f, "remote({base_url})"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub record_source: RecordSource,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    /// Directory holding the persisted key-value slots (favorites).
    pub data_dir: PathBuf,
    pub search_debounce_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("record_source", &self.record_source)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("data_dir", &self.data_dir)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .finish()
    }
}

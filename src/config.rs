use std::env;

/// Upstream endpoint serving the `{ "items": [...] }` grades document.
pub const DEFAULT_GRADES_URL: &str = "https://slimmecijfers.1242601565.workers.dev/grades";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/slimme_cijfers.log";

/// Runtime settings read from the environment (and `.env`, once loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL or local file path of the grades document.
    pub source: String,
    /// Optional bearer token sent with HTTP requests.
    pub api_key: Option<String>,
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            source: get("GRADES_URL").unwrap_or_else(|| DEFAULT_GRADES_URL.to_string()),
            api_key: get("GRADES_API_KEY"),
            log_file_path: get("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
        }
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self
    }
}

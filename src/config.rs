use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Careloop";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "careloop=info,tower_http=warn".to_string()
}

/// Get the application data directory
/// ~/Careloop/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Careloop")
}

/// Get the query database path, overridable with CARELOOP_DB_PATH
pub fn database_path() -> PathBuf {
    std::env::var("CARELOOP_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| app_data_dir().join("queries.db"))
}

/// Address the HTTP API binds to, overridable with CARELOOP_BIND_ADDR
pub fn bind_addr() -> String {
    std::env::var("CARELOOP_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8002".to_string())
}

/// Base URL of the local Ollama instance, overridable with CARELOOP_OLLAMA_URL
pub fn ollama_base_url() -> String {
    std::env::var("CARELOOP_OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Model used for draft generation, overridable with CARELOOP_OLLAMA_MODEL
pub fn ollama_model() -> String {
    std::env::var("CARELOOP_OLLAMA_MODEL").unwrap_or_else(|_| "medgemma".to_string())
}

/// Bounded timeout for a single draft-generation call, in seconds.
/// Overridable with CARELOOP_GENERATION_TIMEOUT_SECS.
pub fn generation_timeout_secs() -> u64 {
    std::env::var("CARELOOP_GENERATION_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30)
}

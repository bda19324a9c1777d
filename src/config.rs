// config.rs
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Identity Store (the local json-server instance).
    pub api_base_url: String,
    /// Path of the durable key-value store file.
    pub storage_path: PathBuf,
    /// OTP challenge lifetime in seconds.
    pub otp_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        AppConfig {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            storage_path: env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage.json")),
            otp_ttl_secs: env::var("OTP_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://localhost:3001".to_string(),
            storage_path: PathBuf::from("storage.json"),
            otp_ttl_secs: 300,
        }
    }
}

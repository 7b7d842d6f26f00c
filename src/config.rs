//! Configuration management for trackmap.
//!
//! Configuration values come from environment variables, optionally seeded from
//! `.env` files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/trackmap/.env`)
//! 4. Application defaults (where applicable)
//!
//! The Spotify credentials have no default; every other value does.

use std::{env, path::PathBuf, time::Duration};

use crate::errors::{Error, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_MARKET_RESOLVER: &str = "table";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads `.env` files from the working directory and the local data directory.
///
/// Neither file has to exist. Variables that are already present in the
/// process environment are never overwritten, so the working-directory file
/// wins over the data-directory one.
///
/// # Errors
///
/// Returns a configuration error if a `.env` file exists but cannot be parsed,
/// or if the data directory cannot be created.
///
/// # Example
///
/// ```
/// use trackmap::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| Error::Configuration(e.to_string()))?;
    }

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Configuration(e.to_string()))?;
    }

    Ok(())
}

/// Platform-specific directory holding the user's `.env` file.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trackmap");
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Configuration(format!("{} must be set", name))),
    }
}

/// Address the web server binds to (`SERVER_ADDRESS`), e.g. `127.0.0.1:5000`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify application client id (`CLIENT_ID`).
///
/// # Errors
///
/// Returns a configuration error if the variable is unset or blank.
pub fn spotify_client_id() -> Result<String> {
    required("CLIENT_ID")
}

/// Spotify application client secret (`CLIENT_SECRET`).
///
/// The secret is only ever placed in the Basic authorization header of the
/// token request. It is never logged.
pub fn spotify_client_secret() -> Result<String> {
    required("CLIENT_SECRET")
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Spotify client-credentials token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL)
}

/// Geocoder search endpoint (`GEOCODER_URL`), Nominatim-compatible.
pub fn geocoder_url() -> String {
    var_or("GEOCODER_URL", DEFAULT_GEOCODER_URL)
}

/// Market resolution strategy name (`MARKET_RESOLVER`): `table` or `geocode`.
pub fn market_resolver() -> String {
    var_or("MARKET_RESOLVER", DEFAULT_MARKET_RESOLVER)
}

/// Optional replacement for the bundled country dataset (`COUNTRY_TABLE_PATH`).
pub fn country_table_path() -> Option<PathBuf> {
    env::var("COUNTRY_TABLE_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Timeout applied to every outbound HTTP request (`HTTP_TIMEOUT_SECS`).
///
/// Falls back to the default when the value is missing or not a number.
pub fn http_timeout() -> Duration {
    let secs = env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

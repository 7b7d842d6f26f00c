//! Track Market Map Library
//!
//! Given an artist name, this library asks the Spotify Web API for the artist's
//! top track, collects the countries ("markets") where that track can be
//! streamed, resolves each market to a coordinate and renders an interactive
//! world map with one marker per market.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the search form and the map page
//! - `config` - Configuration management and environment variables
//! - `errors` - Error type shared by every layer
//! - `http` - Outbound HTTP client construction and JSON decoding
//! - `lookup` - The artist -> track -> markets -> map pipeline
//! - `map` - Leaflet map rendering
//! - `markets` - Market code resolution (bundled table or live geocoding)
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use trackmap::{config, lookup::Lookup, markets::MarketResolver, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> trackmap::Res<()> {
//!     config::load_env().await?;
//!     let spotify = SpotifyClient::from_env()?;
//!     let resolver = MarketResolver::from_env().await?;
//!     let result = Lookup::new(&spotify, &resolver).run("RHCP").await?;
//!     println!("{} markets", result.markets.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod lookup;
pub mod map;
pub mod markets;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for the binary and top-level glue.
///
/// Library code returns [`errors::Result`]; this boxed alias is what `main`
/// and the CLI commands use when they mix errors from several sources.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal conditions in the binary, such as missing credentials
/// at startup. Library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable conditions: skipped markets, failed geocoding calls,
/// requests that ended in an error page.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

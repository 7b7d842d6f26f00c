//! # API Module
//!
//! HTTP handlers for the web front end.
//!
//! ## Endpoints
//!
//! - [`search_form`] - `GET /`, the static search form
//! - [`search`] - `GET /search?artist=<name>`, runs the lookup pipeline and
//!   returns a page with a back link, the artist and track names and the
//!   market map
//! - [`health`] - `GET /health`, status, version and active resolver as JSON
//!
//! ## Error Pages
//!
//! Failures are rendered as HTML, never as a bare 500:
//!
//! - no `artist` parameter: 400 with a prompt to enter a name
//! - no search results: 404 page naming the requested artist
//! - no top tracks: 404 page
//! - token or upstream failure: 502 page
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use trackmap::api::{health, search, search_form};
//!
//! let app = Router::new()
//!     .route("/", get(search_form))
//!     .route("/search", get(search))
//!     .route("/health", get(health));
//! ```

mod error;
mod health;
pub mod pages;
mod search;

pub use error::PageError;
pub use health::health;
pub use search::{SearchParams, search, search_form};

//! # Spotify Integration Module
//!
//! A thin client for the Spotify Web API, using the client-credentials flow.
//! No user authorization is involved: the application id and secret are
//! exchanged for a short-lived bearer token, which then authorizes three
//! read-only calls.
//!
//! ## Request Chain
//!
//! ```text
//! POST /api/token                      -> access_token
//! GET  /search?type=artist&limit=1     -> artist id
//! GET  /artists/{id}/top-tracks        -> track id
//! GET  /tracks/{id}                    -> available_markets
//! ```
//!
//! Each call depends on the previous one's identifier, so they run strictly in
//! sequence. All of them share one `reqwest::Client` and its timeout.
//!
//! ## Error Types
//!
//! Every function returns [`crate::errors::Result`]. Empty search results and
//! empty top-track lists get their own variants
//! ([`crate::errors::Error::ArtistNotFound`], [`crate::errors::Error::NoTopTracks`])
//! so the web layer can tell "nothing found" apart from upstream failures.

pub mod auth;
pub mod catalog;

pub use auth::{Credentials, get_auth_header, request_token};
pub use catalog::{REFERENCE_MARKET, SpotifyClient};

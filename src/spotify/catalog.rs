use reqwest::Client;

use crate::{
    config,
    errors::{Error, Result},
    http,
    spotify::auth::{Credentials, get_auth_header, request_token},
    types::{Artist, SearchArtistsResponse, TopTracksResponse, Track, TrackMarketsResponse},
};

/// Market used for the top-tracks and track lookups. Fixed on purpose.
pub const REFERENCE_MARKET: &str = "US";

/// Read-only client for the handful of Spotify Web API endpoints we use.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token_url: String,
    credentials: Credentials,
}

impl SpotifyClient {
    /// Creates a client against explicit endpoints.
    ///
    /// `api_url` is the Web API base (for example `https://api.spotify.com/v1`)
    /// and `token_url` the client-credentials token endpoint.
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            credentials,
        }
    }

    /// Creates a client from the environment: credentials, endpoints and
    /// request timeout all come from [`config`].
    ///
    /// # Errors
    ///
    /// Fails when `CLIENT_ID` or `CLIENT_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            http::build_client(config::http_timeout())?,
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
            Credentials::from_env()?,
        ))
    }

    /// Requests a fresh access token.
    pub async fn token(&self) -> Result<String> {
        request_token(&self.client, &self.token_url, &self.credentials).await
    }

    /// Searches for an artist and returns the best match.
    ///
    /// "Best match" is the first item of `artists.items` with `limit=1`, i.e.
    /// whatever Spotify ranks highest. No further scoring is applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtistNotFound`] carrying `name` when the search has no
    /// results, so callers can render a dedicated page for it.
    ///
    /// # Example
    ///
    /// ```
    /// let artist = spotify.search_artist(&token, "RHCP").await?;
    /// assert_eq!(artist.name, "Red Hot Chili Peppers");
    /// ```
    pub async fn search_artist(&self, token: &str, name: &str) -> Result<Artist> {
        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .headers(get_auth_header(token))
            .query(&[("q", name), ("type", "artist"), ("limit", "1")])
            .send()
            .await?;

        let res: SearchArtistsResponse = http::read_json(response).await?;
        res.artists
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::ArtistNotFound(name.to_string()))
    }

    /// Returns the artist's top tracks in [`REFERENCE_MARKET`], in Spotify's order.
    pub async fn top_tracks(&self, token: &str, artist_id: &str) -> Result<Vec<Track>> {
        let response = self
            .client
            .get(format!("{}/artists/{}/top-tracks", self.api_url, artist_id))
            .headers(get_auth_header(token))
            .query(&[("country", REFERENCE_MARKET)])
            .send()
            .await?;

        let res: TopTracksResponse = http::read_json(response).await?;
        Ok(res.tracks)
    }

    /// Returns the first of the artist's top tracks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTopTracks`] when the list is empty.
    pub async fn top_track(&self, token: &str, artist_id: &str) -> Result<Track> {
        self.top_tracks(token, artist_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoTopTracks(artist_id.to_string()))
    }

    /// Returns the track's `available_markets`, as ISO 3166-1 alpha-2 codes.
    pub async fn get_markets(&self, token: &str, track_id: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/tracks/{}", self.api_url, track_id))
            .headers(get_auth_header(token))
            .query(&[("country", REFERENCE_MARKET)])
            .send()
            .await?;

        let res: TrackMarketsResponse = http::read_json(response).await?;
        Ok(res.available_markets)
    }
}

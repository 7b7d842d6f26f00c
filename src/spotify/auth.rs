use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    config,
    errors::{Error, Result},
    http,
    types::TokenResponse,
};

/// Spotify application credentials, read once at startup.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads `CLIENT_ID` and `CLIENT_SECRET` from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        ))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Base64 of `client_id:client_secret`, the HTTP Basic credential.
    pub fn basic_credential(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Returns the authorization header map for a bearer token.
///
/// # Example
///
/// ```
/// let headers = get_auth_header("token");
/// assert_eq!(headers["Authorization"], "Bearer token");
/// ```
pub fn get_auth_header(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // Tokens with control characters become an empty header; upstream answers 401.
    let value = HeaderValue::from_str(&format!("Bearer {}", token))
        .unwrap_or_else(|_| HeaderValue::from_static(""));
    headers.insert(AUTHORIZATION, value);
    headers
}

/// Exchanges the credential pair for a client-credentials access token.
///
/// Sends one `POST` to `token_url` with a Basic authorization header and the
/// form body `grant_type=client_credentials`. There is no caching and no
/// refresh: every search asks for a fresh token.
///
/// # Errors
///
/// - [`Error::Http`] on transport failure or timeout
/// - [`Error::Upstream`] on a non-2xx response (bad credentials, for example)
/// - [`Error::Decode`] when the body has no `access_token`
pub async fn request_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<String> {
    let response = client
        .post(token_url)
        .header(
            AUTHORIZATION,
            format!("Basic {}", credentials.basic_credential()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let token: TokenResponse = http::read_json(response).await?;
    if token.access_token.is_empty() {
        return Err(Error::MissingField("access_token"));
    }

    Ok(token.access_token)
}

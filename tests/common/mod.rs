//! Fake upstream services for integration tests.
//!
//! Each fake is an axum app bound to `127.0.0.1:0` and served from a
//! background task, so tests exercise real HTTP without leaving the machine.

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Extension, Form, Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use trackmap::{
    markets::{CountryTable, Geocoder, GeocodingResolver, MarketResolver},
    server::{self, AppState},
    spotify::{Credentials, SpotifyClient},
};

pub const CLIENT_ID: &str = "test-id";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "test-token";

pub const RHCP_ID: &str = "0L8ExT028jH3ddEcZwqJJ5";
pub const RHCP_NAME: &str = "Red Hot Chili Peppers";
pub const RHCP_TRACK_ID: &str = "3d9DChrdc6BOeFsbrZ3Is0";
pub const RHCP_TRACK_NAME: &str = "Under the Bridge";
pub const SILENT_ID: &str = "7silentArtist000000000";

/// Binds a random local port, serves `app` on it and returns the base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    format!("http://{}", addr)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", ACCESS_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
    )
        .into_response()
}

async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let expected = format!(
        "Basic {}",
        Credentials::new(CLIENT_ID, CLIENT_SECRET).basic_credential()
    );
    let auth_ok = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);

    if !auth_ok || form.get("grant_type").map(String::as_str) != Some("client_credentials") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_client"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn search(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let query = q.get("q").map(String::as_str).unwrap_or_default();
    let items = match query {
        "RHCP" | "Red Hot Chili Peppers" => vec![json!({"id": RHCP_ID, "name": RHCP_NAME, "popularity": 83})],
        "silent" => vec![json!({"id": SILENT_ID, "name": "Silent Artist"})],
        _ => vec![],
    };

    Json(json!({
        "artists": {
            "href": "https://api.spotify.com/v1/search",
            "limit": q.get("limit").cloned().unwrap_or_default(),
            "items": items
        }
    }))
    .into_response()
}

async fn top_tracks(
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if q.get("country").map(String::as_str) != Some("US") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "country"}))).into_response();
    }

    let tracks = if id == RHCP_ID {
        vec![
            json!({"id": RHCP_TRACK_ID, "name": RHCP_TRACK_NAME}),
            json!({"id": "64BbK9SFKH2jk86U3dGj2P", "name": "Otherside"}),
        ]
    } else {
        vec![]
    };

    Json(json!({ "tracks": tracks })).into_response()
}

async fn track(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id != RHCP_TRACK_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "Non existing id"}})),
        )
            .into_response();
    }

    Json(json!({
        "id": RHCP_TRACK_ID,
        "name": RHCP_TRACK_NAME,
        "available_markets": ["US", "PL", "ZZ", "ET", "AO"]
    }))
    .into_response()
}

/// Serves the token endpoint at `/api/token` and the Web API under `/v1`.
pub async fn spawn_fake_spotify() -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .route("/v1/artists/{id}/top-tracks", get(top_tracks))
        .route("/v1/tracks/{id}", get(track));
    spawn(app).await
}

pub fn spotify_client(base: &str, credentials: Credentials) -> SpotifyClient {
    SpotifyClient::new(
        reqwest::Client::new(),
        format!("{}/v1", base),
        format!("{}/api/token", base),
        credentials,
    )
}

pub fn test_credentials() -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET)
}

/// Geocoder fake that counts requests and can be told to fail for a name.
#[derive(Default)]
pub struct FakeGeocoder {
    pub hits: AtomicUsize,
    pub failing: Mutex<HashSet<String>>,
}

impl FakeGeocoder {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn fail_for(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn recover(&self, name: &str) {
        self.failing.lock().unwrap().remove(name);
    }
}

async fn geocode(
    Extension(fake): Extension<Arc<FakeGeocoder>>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    let name = q.get("q").cloned().unwrap_or_default();

    if fake.failing.lock().unwrap().contains(&name) {
        return (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response();
    }

    let place = match name.as_str() {
        "United States" => Some(("39.7837304", "-100.445882")),
        "Poland" => Some(("52.215933", "19.134422")),
        "Ethiopia" => Some(("10.2116702", "38.6521203")),
        _ => None,
    };

    match place {
        Some((lat, lon)) => {
            Json(json!([{"lat": lat, "lon": lon, "display_name": name}])).into_response()
        }
        None => Json(json!([])).into_response(),
    }
}

pub async fn spawn_fake_geocoder() -> (String, Arc<FakeGeocoder>) {
    let fake = Arc::new(FakeGeocoder::default());
    let app = Router::new()
        .route("/search", get(geocode))
        .layer(Extension(Arc::clone(&fake)));
    (spawn(app).await, fake)
}

pub fn geocoding_resolver(base: &str) -> GeocodingResolver {
    GeocodingResolver::new(
        CountryTable::bundled().expect("bundled table"),
        Geocoder::new(
            reqwest::Client::new(),
            format!("{}/search", base),
            Duration::from_millis(0),
        ),
    )
}

/// Starts the real app against the given upstream and returns its base URL.
pub async fn spawn_app(spotify: SpotifyClient, resolver: MarketResolver) -> String {
    let state = Arc::new(AppState::new(spotify, resolver));
    spawn(server::router(state)).await
}

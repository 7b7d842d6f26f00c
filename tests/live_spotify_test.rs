//! Checks against the real Spotify Web API.
//!
//! Ignored by default. Run with real application credentials:
//!
//! ```text
//! CLIENT_ID=... CLIENT_SECRET=... cargo test --test live_spotify_test -- --ignored
//! ```

use trackmap::spotify::SpotifyClient;

async fn live() -> (SpotifyClient, String) {
    let spotify = SpotifyClient::from_env().expect("CLIENT_ID and CLIENT_SECRET must be set");
    let token = spotify.token().await.expect("token");
    (spotify, token)
}

#[tokio::test]
#[ignore = "requires Spotify credentials and network"]
async fn test_search_artist_canonical_names() {
    let (spotify, token) = live().await;

    for (query, expected) in [
        ("kalush", "KALUSH"),
        ("RHCP", "Red Hot Chili Peppers"),
        ("Антитіла", "Antytila"),
    ] {
        let artist = spotify.search_artist(&token, query).await.unwrap();
        assert_eq!(artist.name, expected, "query {}", query);
    }
}

#[tokio::test]
#[ignore = "requires Spotify credentials and network"]
async fn test_get_markets_known_tracks() {
    let (spotify, token) = live().await;

    for (track_id, code) in [
        ("2vHzOWRKYPLu8umRPIFuOq", "ET"),
        ("44FopWyaddRoiuNrD8hlUw", "PL"),
        ("7exHT4swWOKL5addPeqkLP", "AO"),
    ] {
        let markets = spotify.get_markets(&token, track_id).await.unwrap();
        assert!(markets.iter().any(|m| m == code), "{} not in {}", code, track_id);
    }
}

#[tokio::test]
#[ignore = "requires Spotify credentials and network"]
async fn test_top_track_known_artist() {
    let (spotify, token) = live().await;

    let track = spotify
        .top_track(&token, "46rVVJwHWNS7C7MaWXd842")
        .await
        .unwrap();
    assert_eq!(track.name, "Stefania (Kalush Orchestra)");
}

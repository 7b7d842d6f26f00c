mod common;

use common::*;
use trackmap::markets::{CountryTable, MarketResolver};

async fn spawn_table_app() -> String {
    let upstream = spawn_fake_spotify().await;
    spawn_app(
        spotify_client(&upstream, test_credentials()),
        MarketResolver::Table(CountryTable::bundled().unwrap()),
    )
    .await
}

#[tokio::test]
async fn test_search_form() {
    let app = spawn_table_app().await;

    let res = reqwest::get(format!("{}/", app)).await.unwrap();
    assert_eq!(res.status(), 200);

    let body = res.text().await.unwrap();
    assert!(body.contains("action=\"/search\""));
    assert!(body.contains("name=\"artist\""));
}

#[tokio::test]
async fn test_search_renders_market_map() {
    let app = spawn_table_app().await;

    let res = reqwest::get(format!("{}/search?artist=RHCP", app))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body = res.text().await.unwrap();
    assert!(body.contains("href=\"/\""));
    assert!(body.contains(RHCP_NAME));
    assert!(body.contains(&format!("\"{}\": group_0", RHCP_TRACK_NAME)));

    // US, PL, ET and AO resolve; ZZ is dropped
    assert_eq!(body.matches("L.marker(").count(), 4);
    assert!(body.contains("bindPopup(\"Poland\")"));
    assert!(body.contains("Available in 4 markets"));
}

#[tokio::test]
async fn test_search_with_geocoding_resolver() {
    let upstream = spawn_fake_spotify().await;
    let (geocoder, fake) = spawn_fake_geocoder().await;
    let app = spawn_app(
        spotify_client(&upstream, test_credentials()),
        MarketResolver::Geocode(geocoding_resolver(&geocoder)),
    )
    .await;

    let body = reqwest::get(format!("{}/search?artist=RHCP", app))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // The fake geocoder knows US, PL and ET but not AO
    assert_eq!(body.matches("L.marker(").count(), 3);
    assert_eq!(fake.hits(), 4);

    // The cache is shared across requests
    reqwest::get(format!("{}/search?artist=RHCP", app))
        .await
        .unwrap();
    assert_eq!(fake.hits(), 5);
}

#[tokio::test]
async fn test_unknown_artist_gets_not_found_page() {
    let app = spawn_table_app().await;

    let res = reqwest::get(format!("{}/search?artist=zzz-not-a-real-artist-zzz", app))
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let body = res.text().await.unwrap();
    assert!(body.contains("zzz-not-a-real-artist-zzz"));
    assert!(body.contains("href=\"/\""));
}

#[tokio::test]
async fn test_not_found_page_escapes_artist() {
    let app = spawn_table_app().await;

    let res = reqwest::Client::new()
        .get(format!("{}/search", app))
        .query(&[("artist", "<script>alert(1)</script>")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let body = res.text().await.unwrap();
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_artist_without_top_tracks() {
    let app = spawn_table_app().await;

    let res = reqwest::get(format!("{}/search?artist=silent", app))
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert!(res.text().await.unwrap().contains("no top tracks"));
}

#[tokio::test]
async fn test_missing_artist_parameter() {
    let app = spawn_table_app().await;

    for url in [format!("{}/search", app), format!("{}/search?artist=%20%20", app)] {
        let res = reqwest::get(url).await.unwrap();
        assert_eq!(res.status(), 400);
    }
}

#[tokio::test]
async fn test_bad_credentials_give_error_page() {
    let upstream = spawn_fake_spotify().await;
    let app = spawn_app(
        spotify_client(&upstream, trackmap::spotify::Credentials::new(CLIENT_ID, "nope")),
        MarketResolver::Table(CountryTable::bundled().unwrap()),
    )
    .await;

    let res = reqwest::get(format!("{}/search?artist=RHCP", app))
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
    assert!(res.text().await.unwrap().contains("Something went wrong"));
}

#[tokio::test]
async fn test_health() {
    let app = spawn_table_app().await;

    let json: serde_json::Value = reqwest::get(format!("{}/health", app))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["resolver"], "table");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMarketsResponse {
    pub available_markets: Vec<String>,
}

/// A market code resolved to a display name and a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMarket {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Tabled)]
pub struct MarketTableRow {
    pub code: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl From<&ResolvedMarket> for MarketTableRow {
    fn from(m: &ResolvedMarket) -> Self {
        MarketTableRow {
            code: m.code.clone(),
            country: m.name.clone(),
            latitude: format!("{:.4}", m.latitude),
            longitude: format!("{:.4}", m.longitude),
        }
    }
}

/// One entry of a Nominatim `format=json` search response.
///
/// Nominatim encodes coordinates as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodePlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

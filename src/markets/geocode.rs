use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    errors::Result,
    http,
    markets::{cache::MarketCache, table::CountryTable},
    types::{GeocodePlace, ResolvedMarket},
    warning,
};

/// Nominatim's usage policy allows one request per second.
pub const GEOCODE_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Enforces a minimum interval between consecutive geocoding requests.
///
/// Callers queue on the inner mutex, so concurrent searches are served one
/// at a time in lock order.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Waits until another request is allowed and records it as sent.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Client for a Nominatim-compatible `/search` endpoint.
#[derive(Debug)]
pub struct Geocoder {
    client: Client,
    url: String,
    limiter: RateLimiter,
}

impl Geocoder {
    pub fn new(client: Client, url: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            limiter: RateLimiter::new(min_interval),
        }
    }

    /// Looks up a free-form place name and returns the best hit's coordinate.
    ///
    /// `Ok(None)` means the geocoder answered but found nothing.
    pub async fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>> {
        self.limiter.wait().await;

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let places: Vec<GeocodePlace> = http::read_json(response).await?;
        Ok(places.into_iter().next().and_then(|p| {
            let lat = p.lat.trim().parse::<f64>().ok()?;
            let lon = p.lon.trim().parse::<f64>().ok()?;
            Some((lat, lon))
        }))
    }
}

/// Resolves market codes by geocoding their country names.
///
/// Country names come from the ISO table; coordinates from the geocoder.
/// Successful lookups are cached for the life of the process. Failed lookups
/// are not cached, so a later request tries again.
#[derive(Debug)]
pub struct GeocodingResolver {
    names: CountryTable,
    geocoder: Geocoder,
    cache: MarketCache,
}

impl GeocodingResolver {
    pub fn new(names: CountryTable, geocoder: Geocoder) -> Self {
        Self {
            names,
            geocoder,
            cache: MarketCache::new(),
        }
    }

    /// Geocoder from [`config`] with the one-request-per-second limit.
    pub fn from_env(names: CountryTable) -> Result<Self> {
        let client = http::build_client(config::http_timeout())?;
        Ok(Self::new(
            names,
            Geocoder::new(client, config::geocoder_url(), GEOCODE_MIN_INTERVAL),
        ))
    }

    pub fn cache(&self) -> &MarketCache {
        &self.cache
    }

    pub async fn resolve_one(&self, code: &str) -> Option<ResolvedMarket> {
        let code = code.trim().to_ascii_uppercase();
        if let Some(hit) = self.cache.get(&code).await {
            return Some(hit);
        }

        let Some(name) = self.names.name(&code) else {
            warning!("Skipping unknown market code {}", code);
            return None;
        };

        match self.geocoder.geocode(name).await {
            Ok(Some((latitude, longitude))) => {
                let market = ResolvedMarket {
                    code,
                    name: name.to_string(),
                    latitude,
                    longitude,
                };
                self.cache.insert(market.clone()).await;
                Some(market)
            }
            Ok(None) => {
                warning!("Geocoder found nothing for {} ({})", name, code);
                None
            }
            Err(e) => {
                warning!("Geocoding {} ({}) failed: {}", name, code, e);
                None
            }
        }
    }

    /// Resolves every code in order; unresolvable codes are dropped.
    pub async fn resolve(&self, codes: &[String]) -> Vec<ResolvedMarket> {
        let mut markets = Vec::with_capacity(codes.len());
        for code in codes {
            if let Some(market) = self.resolve_one(code).await {
                markets.push(market);
            }
        }
        markets
    }
}

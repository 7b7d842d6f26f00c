//! # Market Resolution
//!
//! Turns Spotify market codes (ISO 3166-1 alpha-2) into display names and map
//! coordinates. Two strategies share one interface:
//!
//! - [`ResolverKind::Table`] joins against the bundled country dataset. No
//!   network, no cache needed.
//! - [`ResolverKind::Geocode`] takes the name from the same dataset and asks a
//!   Nominatim-compatible geocoder for the coordinate, one request per second,
//!   caching successes for the life of the process.
//!
//! Both return markets in input order and silently leave out codes they cannot
//! resolve. Resolution never fails a request.

pub mod cache;
pub mod geocode;
pub mod table;

use std::{collections::HashSet, fmt, str::FromStr};

use clap::ValueEnum;

use crate::{
    config,
    errors::{Error, Result},
    types::ResolvedMarket,
};

pub use cache::MarketCache;
pub use geocode::{Geocoder, GeocodingResolver, RateLimiter};
pub use table::{Country, CountryTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// Bundled country/coordinate table
    Table,
    /// Live geocoding through Nominatim
    Geocode,
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverKind::Table => write!(f, "table"),
            ResolverKind::Geocode => write!(f, "geocode"),
        }
    }
}

impl FromStr for ResolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "csv" => Ok(ResolverKind::Table),
            "geocode" | "geocoding" | "nominatim" => Ok(ResolverKind::Geocode),
            other => Err(Error::Configuration(format!(
                "unknown market resolver `{}` (expected `table` or `geocode`)",
                other
            ))),
        }
    }
}

#[derive(Debug)]
pub enum MarketResolver {
    Table(CountryTable),
    Geocode(GeocodingResolver),
}

impl MarketResolver {
    /// Builds the resolver named by `kind`, reading the dataset override and
    /// geocoder settings from [`config`].
    pub async fn from_kind(kind: ResolverKind) -> Result<Self> {
        let table = match config::country_table_path() {
            Some(path) => CountryTable::load(&path).await?,
            None => CountryTable::bundled()?,
        };

        Ok(match kind {
            ResolverKind::Table => MarketResolver::Table(table),
            ResolverKind::Geocode => MarketResolver::Geocode(GeocodingResolver::from_env(table)?),
        })
    }

    /// Builds the resolver named by `MARKET_RESOLVER`.
    pub async fn from_env() -> Result<Self> {
        Self::from_kind(config::market_resolver().parse()?).await
    }

    pub fn kind(&self) -> ResolverKind {
        match self {
            MarketResolver::Table(_) => ResolverKind::Table,
            MarketResolver::Geocode(_) => ResolverKind::Geocode,
        }
    }

    /// Resolves `codes` in order, dropping unknown codes and repeats.
    pub async fn resolve(&self, codes: &[String]) -> Vec<ResolvedMarket> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = codes
            .iter()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| seen.insert(c.clone()))
            .collect();

        match self {
            MarketResolver::Table(table) => table.resolve(&unique),
            MarketResolver::Geocode(geocoder) => geocoder.resolve(&unique).await,
        }
    }
}

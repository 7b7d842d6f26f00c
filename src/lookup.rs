//! The search pipeline: token, artist, top track, markets, resolution.
//!
//! Each step needs the identifier produced by the one before it, so the steps
//! run strictly in sequence. Both the `/search` page and the `markets` CLI
//! command go through [`Lookup::run`].

use crate::{
    errors::Result,
    info,
    map::{WorldMap, market_map},
    markets::MarketResolver,
    spotify::SpotifyClient,
    types::{Artist, ResolvedMarket, Track},
};

#[derive(Debug, Clone)]
pub struct MarketLookup {
    pub artist: Artist,
    pub track: Track,
    /// Codes as returned by Spotify.
    pub market_codes: Vec<String>,
    /// Resolved subset of `market_codes`, in the same order.
    pub markets: Vec<ResolvedMarket>,
}

impl MarketLookup {
    /// Number of market codes that could not be placed on the map.
    pub fn skipped(&self) -> usize {
        self.market_codes.len().saturating_sub(self.markets.len())
    }

    pub fn map(&self) -> WorldMap {
        market_map(&self.track.name, &self.markets)
    }
}

pub struct Lookup<'a> {
    spotify: &'a SpotifyClient,
    resolver: &'a MarketResolver,
}

impl<'a> Lookup<'a> {
    pub fn new(spotify: &'a SpotifyClient, resolver: &'a MarketResolver) -> Self {
        Self { spotify, resolver }
    }

    /// Runs the pipeline for one artist name.
    ///
    /// A fresh token is requested on every run. The first search hit is the
    /// artist and the first top track is the track.
    ///
    /// # Errors
    ///
    /// Token, search, top-track and market calls propagate their errors.
    /// Market resolution never fails; unresolvable codes are just missing
    /// from [`MarketLookup::markets`].
    pub async fn run(&self, artist_name: &str) -> Result<MarketLookup> {
        let token = self.spotify.token().await?;

        let artist = self.spotify.search_artist(&token, artist_name).await?;
        let track = self.spotify.top_track(&token, &artist.id).await?;
        let market_codes = self.spotify.get_markets(&token, &track.id).await?;

        info!(
            "\"{}\" -> {} -> \"{}\" ({} markets)",
            artist_name,
            artist.name,
            track.name,
            market_codes.len()
        );

        let markets = self.resolver.resolve(&market_codes).await;

        Ok(MarketLookup {
            artist,
            track,
            market_codes,
            markets,
        })
    }
}

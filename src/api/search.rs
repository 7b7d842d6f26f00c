use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;

use crate::{
    api::{error::PageError, pages},
    lookup::Lookup,
    server::AppState,
    success,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub artist: Option<String>,
}

pub async fn search_form() -> Html<&'static str> {
    Html(pages::INDEX_PAGE)
}

pub async fn search(
    Query(params): Query<SearchParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    let artist = params
        .artist
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or(PageError::MissingArtist)?;

    let lookup = Lookup::new(&state.spotify, &state.resolver).run(artist).await?;
    success!(
        "Mapped {} of {} markets for \"{}\"",
        lookup.markets.len(),
        lookup.market_codes.len(),
        lookup.track.name
    );

    Ok(Html(pages::result_page(&lookup)))
}

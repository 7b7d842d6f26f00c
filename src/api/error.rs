use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{api::pages, errors::Error, warning};

/// Failure of a page handler, rendered as an HTML page.
#[derive(Debug)]
pub enum PageError {
    MissingArtist,
    Lookup(Error),
}

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        PageError::Lookup(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PageError::MissingArtist => (
                StatusCode::BAD_REQUEST,
                pages::error_page("Enter an artist name to search for."),
            ),
            PageError::Lookup(Error::ArtistNotFound(requested)) => {
                warning!("No artist found for \"{}\"", requested);
                (StatusCode::NOT_FOUND, pages::not_found_page(&requested))
            }
            PageError::Lookup(Error::NoTopTracks(artist_id)) => {
                warning!("Artist {} has no top tracks", artist_id);
                (
                    StatusCode::NOT_FOUND,
                    pages::error_page("This artist has no top tracks to map."),
                )
            }
            PageError::Lookup(e) => {
                warning!("Search failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    pages::error_page("Spotify could not be reached. Try again in a moment."),
                )
            }
        };

        (status, Html(body)).into_response()
    }
}

use crate::{lookup::MarketLookup, map::escape_html};

pub const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const RESULT_PAGE: &str = include_str!("../../templates/result.html");
const NOT_FOUND_PAGE: &str = include_str!("../../templates/not_found.html");
const ERROR_PAGE: &str = include_str!("../../templates/error.html");

/// Substitutes `{{name}}` placeholders in one pass.
///
/// Values are inserted verbatim and never rescanned, so a value that happens
/// to contain `{{...}}` stays as it is. Unknown placeholders are kept.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn result_page(lookup: &MarketLookup) -> String {
    let artist = escape_html(&lookup.artist.name);
    let track = escape_html(&lookup.track.name);
    let count = lookup.markets.len().to_string();
    let map = lookup.map().render();

    fill(
        RESULT_PAGE,
        &[
            ("artist", artist.as_str()),
            ("track", track.as_str()),
            ("count", count.as_str()),
            ("map", map.as_str()),
        ],
    )
}

/// Page for a search with no results, naming the artist that was asked for.
pub fn not_found_page(requested: &str) -> String {
    let artist = escape_html(requested);
    fill(NOT_FOUND_PAGE, &[("artist", artist.as_str())])
}

pub fn error_page(message: &str) -> String {
    let message = escape_html(message);
    fill(ERROR_PAGE, &[("message", message.as_str())])
}

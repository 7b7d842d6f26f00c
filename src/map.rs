//! Leaflet map rendering.
//!
//! A [`WorldMap`] owns named overlay layers ([`FeatureGroup`]), each holding
//! markers. [`WorldMap::render`] serializes the whole widget to an embeddable
//! fragment: the Leaflet stylesheet and script, the map container and an
//! inline script that builds the map. Nothing is persisted; the map is rebuilt
//! for every request.

use std::fmt::Write;

use crate::types::ResolvedMarket;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const BASE_LAYER_NAME: &str = "OpenStreetMap";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    /// Plain text; escaped when rendered.
    pub popup: String,
}

/// A named, independently toggleable group of markers.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub name: String,
    pub markers: Vec<Marker>,
}

impl FeatureGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
        }
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldMap {
    element_id: String,
    groups: Vec<FeatureGroup>,
    layer_control: bool,
}

impl WorldMap {
    /// A world view map rendered into a `<div>` with the given id.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            groups: Vec::new(),
            layer_control: false,
        }
    }

    pub fn add_group(&mut self, group: FeatureGroup) {
        self.groups.push(group);
    }

    /// Adds the layer-visibility control listing every overlay group.
    pub fn add_layer_control(&mut self) {
        self.layer_control = true;
    }

    pub fn groups(&self) -> &[FeatureGroup] {
        &self.groups
    }

    pub fn marker_count(&self) -> usize {
        self.groups.iter().map(|g| g.markers.len()).sum()
    }

    pub fn render(&self) -> String {
        let id = js_string(&self.element_id);
        let mut script = String::new();

        let _ = writeln!(
            script,
            "var map = L.map({id}, {{center: [20, 0], zoom: 2, worldCopyJump: true}});"
        );
        let _ = writeln!(
            script,
            "var base = L.tileLayer({}, {{maxZoom: 19, attribution: {}}}).addTo(map);",
            js_string(TILE_URL),
            js_string(TILE_ATTRIBUTION)
        );

        for (idx, group) in self.groups.iter().enumerate() {
            let _ = writeln!(script, "var group_{idx} = L.featureGroup().addTo(map);");
            for marker in &group.markers {
                let _ = writeln!(
                    script,
                    "L.marker([{}, {}], {{icon: new L.Icon.Default()}}).bindPopup({}).addTo(group_{idx});",
                    marker.latitude,
                    marker.longitude,
                    js_string(&escape_html(&marker.popup))
                );
            }
        }

        if self.layer_control {
            let overlays: Vec<String> = self
                .groups
                .iter()
                .enumerate()
                .map(|(idx, g)| format!("{}: group_{idx}", js_string(&escape_html(&g.name))))
                .collect();
            let _ = writeln!(
                script,
                "L.control.layers({{{}: base}}, {{{}}}).addTo(map);",
                js_string(BASE_LAYER_NAME),
                overlays.join(", ")
            );
        }

        format!(
            concat!(
                "<link rel=\"stylesheet\" href=\"{css}\"/>\n",
                "<script src=\"{js}\"></script>\n",
                "<div id=\"{div}\" style=\"width: 100%; height: 85vh;\"></div>\n",
                "<script>\n(function () {{\n{script}}})();\n</script>\n"
            ),
            css = LEAFLET_CSS,
            js = LEAFLET_JS,
            div = escape_html(&self.element_id),
            script = script
        )
    }
}

/// Builds the market map for one track: a single overlay layer named after the
/// track, one marker per market labelled with the country name, and a layer
/// control.
pub fn market_map(track_name: &str, markets: &[ResolvedMarket]) -> WorldMap {
    let mut group = FeatureGroup::new(track_name);
    for market in markets {
        group.add_marker(Marker {
            latitude: market.latitude,
            longitude: market.longitude,
            popup: market.name.clone(),
        });
    }

    let mut map = WorldMap::new("market-map");
    map.add_group(group);
    map.add_layer_control();
    map
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// A JavaScript string literal that is also safe inside `<script>`.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

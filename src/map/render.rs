//! Render coordinate groups as a Leaflet web map.
//!
//! The output is plain HTML with an inline script; Leaflet itself is loaded
//! from a CDN. Marker data is embedded as a JSON array so the page needs no
//! other assets.
//!
//! Two output modes:
//! - `Page`: a complete standalone document, meant to be saved to disk
//! - `Fragment`: `<link>` + `<div>` + `<script>`, meant to be embedded in
//!   another page

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::MapSettings;
use crate::domain::CoordinateGroups;
use crate::error::AppError;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const MAP_ID: &str = "friends_map";
const MARKERS_LAYER: &str = "markers";
const BASE_LAYER: &str = "tiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Page,
    Fragment,
}

#[derive(Debug, Serialize)]
struct MarkerSpec {
    lat: f64,
    lon: f64,
    popup: String,
}

/// Render the map in the requested mode.
pub fn render_map(groups: &CoordinateGroups, settings: &MapSettings, mode: RenderMode) -> Result<String, AppError> {
    let fragment = render_fragment(groups, settings)?;
    Ok(match mode {
        RenderMode::Fragment => fragment,
        RenderMode::Page => wrap_page(&fragment),
    })
}

/// Write a rendered page, replacing whatever was at `path`.
pub fn write_page(path: &Path, html: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", parent.display())))?;
    }
    fs::write(path, html).map_err(|e| AppError::io(format!("Failed to write map '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = html.len(), "saved map");
    Ok(())
}

fn render_fragment(groups: &CoordinateGroups, settings: &MapSettings) -> Result<String, AppError> {
    let markers: Vec<MarkerSpec> = groups
        .iter()
        .map(|g| MarkerSpec {
            lat: g.coordinate.latitude,
            lon: g.coordinate.longitude,
            popup: escape_html(&g.label()),
        })
        .collect();

    let markers_json = script_json(&markers)?;
    let tiles_json = script_json(&settings.tiles)?;
    let attribution_json = script_json(&settings.attribution)?;

    let mut out = String::new();
    out.push_str(&format!("<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\"/>\n"));
    out.push_str(&format!("<script src=\"{LEAFLET_JS}\"></script>\n"));
    out.push_str(&format!(
        "<div id=\"{MAP_ID}\" style=\"position: relative; width: 100%; height: 100%; min-height: 480px;\"></div>\n"
    ));
    out.push_str("<script>\n");
    out.push_str("(function () {\n");
    out.push_str(&format!(
        "  var map = L.map(\"{MAP_ID}\", {{ center: [0, 0], zoom: {} }});\n",
        settings.zoom
    ));
    out.push_str(&format!(
        "  var base = L.tileLayer({tiles_json}, {{ attribution: {attribution_json} }}).addTo(map);\n"
    ));
    out.push_str("  var markers = L.featureGroup();\n");
    out.push_str(&format!("  var specs = {markers_json};\n"));
    out.push_str("  specs.forEach(function (m) {\n");
    out.push_str("    L.marker([m.lat, m.lon]).bindPopup(m.popup).addTo(markers);\n");
    out.push_str("  });\n");
    out.push_str("  markers.addTo(map);\n");
    out.push_str(&format!(
        "  L.control.layers({{ \"{BASE_LAYER}\": base }}, {{ \"{MARKERS_LAYER}\": markers }}).addTo(map);\n"
    ));
    out.push_str("})();\n");
    out.push_str("</script>\n");
    Ok(out)
}

fn wrap_page(fragment: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<!-- generated by friends-map at {} -->\n",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    ));
    out.push_str("<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\"/>\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"/>\n");
    out.push_str("<title>Friends map</title>\n");
    out.push_str("<style>html, body { width: 100%; height: 100%; margin: 0; padding: 0; }</style>\n");
    out.push_str("</head>\n<body>\n");
    out.push_str(fragment);
    out.push_str("</body>\n</html>\n");
    out
}

/// JSON for inline `<script>` use; `</` is escaped so a value cannot close the tag.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::io(format!("Failed to encode map data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

//! Payloads for the browser: a Plotly heatmap figure and a Leaflet map
//! fragment. Rendering happens client-side.

use serde_json::{Value, json};

use crate::model::{Coordinates, EnvironmentalRecord};

const MAP_ZOOM: u8 = 10;
const LEAFLET_VERSION: &str = "1.9.4";

/// Plotly figure with one heatmap row over AQI, PM2.5, ozone and air
/// temperature.
///
/// Missing values are drawn as 0. That default lives here only; the record
/// itself keeps them absent.
pub fn heatmap_figure(record: &EnvironmentalRecord) -> Value {
    let parameters = [
        ("AQI", record.us_aqi),
        ("PM2.5", record.pm25),
        ("Ozone", record.ozone),
        ("Temperature", record.actual_temperature_celsius),
    ];

    let x: Vec<&str> = parameters.iter().map(|(name, _)| *name).collect();
    let z: Vec<f64> = parameters.iter().map(|(_, v)| v.unwrap_or(0.0)).collect();

    json!({
        "data": [{
            "type": "heatmap",
            "z": [z],
            "x": x,
            "y": ["Values"],
            "colorscale": "RdYlBu_r"
        }],
        "layout": {
            "title": { "text": "Climate Parameters Heatmap" },
            "xaxis": { "title": { "text": "Parameters" } },
            "yaxis": { "title": { "text": "Intensity" } }
        }
    })
}

/// [`heatmap_figure`] serialized to a JSON string.
pub fn heatmap_json(record: &EnvironmentalRecord) -> String {
    heatmap_figure(record).to_string()
}

/// Popup text for the map marker.
pub fn marker_popup(record: &EnvironmentalRecord) -> String {
    format!(
        "AQI: {}<br>PM2.5: {}<br>Ozone: {}",
        display_value(record.us_aqi),
        display_value(record.pm25),
        display_value(record.ozone),
    )
}

/// Self-contained map: an iframe whose `srcdoc` holds a Leaflet page centred
/// on `coords` with a single marker. An iframe keeps the embedded scripts
/// running when the fragment is injected via `innerHTML`.
pub fn map_fragment(coords: Coordinates, record: &EnvironmentalRecord) -> String {
    let popup = Value::String(marker_popup(record)).to_string();
    let lat = coords.latitude;
    let lon = coords.longitude;

    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<link rel="stylesheet" href="https://unpkg.com/leaflet@{v}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{v}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
L.marker([{lat}, {lon}]).addTo(map).bindPopup({popup});
</script>
</body>
</html>"#,
        v = LEAFLET_VERSION,
        zoom = MAP_ZOOM,
    );

    format!(
        r#"<iframe class="envscan-map" style="width:100%;height:420px;border:none;" srcdoc="{}"></iframe>"#,
        escape_attr(&page)
    )
}

fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

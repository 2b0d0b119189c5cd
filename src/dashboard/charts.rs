//! Plotly figure specs for the dashboard charts.
//!
//! Figures are plain JSON handed to Plotly.js in the browser.

use serde::Serialize;
use serde_json::{Value, json};

use crate::models::{ActiveStorm, DATE_FORMAT, HistoricalStorm};

/// Largest marker diameter on the bubble map, in pixels.
const MAX_MARKER_SIZE: f64 = 20.0;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Value,
    pub layout: Value,
}

impl Figure {
    /// Serializes the figure for embedding inside a `<script>` element.
    ///
    /// `<` only appears inside JSON strings, so escaping it keeps a storm
    /// name from closing the script tag.
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_string())
            .replace('<', "\\u003c")
    }
}

/// Bubble map of active storms on an OpenStreetMap base layer, with marker
/// area and colour scaled by wind speed.
pub fn bubble_map(storms: &[ActiveStorm], title: &str) -> Figure {
    let lat: Vec<f64> = storms.iter().map(|s| s.latitude).collect();
    let lon: Vec<f64> = storms.iter().map(|s| s.longitude).collect();
    let wind: Vec<f64> = storms.iter().map(|s| s.wind_speed_knots).collect();
    let names: Vec<&str> = storms.iter().map(|s| s.name.as_str()).collect();

    let max_wind = wind.iter().copied().fold(0.0_f64, f64::max);
    let sizeref = if max_wind > 0.0 {
        2.0 * max_wind / MAX_MARKER_SIZE.powi(2)
    } else {
        1.0
    };

    Figure {
        data: json!([{
            "type": "scattermapbox",
            "mode": "markers",
            "lat": lat,
            "lon": lon,
            "text": names,
            "hovertemplate": "<b>%{text}</b><br>Wind Speed (knots)=%{marker.color}<br>Latitude=%{lat}<br>Longitude=%{lon}<extra></extra>",
            "marker": {
                "size": wind,
                "sizemode": "area",
                "sizeref": sizeref,
                "sizemin": 4,
                "color": wind,
                "colorscale": "Plasma",
                "showscale": true,
                "colorbar": { "title": { "text": "Wind Speed (knots)" } }
            }
        }]),
        layout: json!({
            "title": { "text": title },
            "mapbox": {
                "style": "open-street-map",
                "zoom": 2,
                "center": { "lat": mean(&lat), "lon": mean(&lon) }
            },
            "margin": { "l": 0, "r": 0, "t": 48, "b": 0 },
            "height": 520
        }),
    }
}

/// Line chart of each storm's latest wind speed against its observation date.
pub fn wind_line_chart(storms: &[HistoricalStorm], title: &str) -> Figure {
    let dates: Vec<String> = storms
        .iter()
        .map(|s| s.date.format(DATE_FORMAT).to_string())
        .collect();
    let wind: Vec<f64> = storms.iter().map(|s| s.wind_speed_knots).collect();
    let names: Vec<&str> = storms.iter().map(|s| s.name.as_str()).collect();

    Figure {
        data: json!([{
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": wind,
            "text": names,
            "hovertemplate": "<b>%{text}</b><br>Date=%{x}<br>Wind Speed (knots)=%{y}<extra></extra>"
        }]),
        layout: json!({
            "title": { "text": title },
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": { "title": { "text": "Wind Speed (knots)" } },
            "height": 450
        }),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

//! Server-rendered HTML tables.

use std::fmt::Write;

use crate::models::{ActiveStorm, DATE_FORMAT, HistoricalStorm};

/// A record that can be laid out as one table row.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for ActiveStorm {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Wind Speed (knots)",
        "Pressure (hPa)",
        "Latitude",
        "Longitude",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.wind_speed_knots.to_string(),
            self.pressure_hpa.to_string(),
            self.latitude.to_string(),
            self.longitude.to_string(),
        ]
    }
}

impl TableRow for HistoricalStorm {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Year",
        "Date",
        "Wind Speed (knots)",
        "Pressure (hPa)",
        "Latitude",
        "Longitude",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.year.to_string(),
            self.date.format(DATE_FORMAT).to_string(),
            self.wind_speed_knots.to_string(),
            self.pressure_hpa.to_string(),
            self.latitude.to_string(),
            self.longitude.to_string(),
        ]
    }
}

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `rows` as a `<table>` with an index column.
pub fn render_table<R: TableRow>(rows: &[R]) -> String {
    let mut html = String::from("<table class=\"data\">\n<thead><tr><th></th>");
    for header in R::HEADERS {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (i, row) in rows.iter().enumerate() {
        let _ = write!(html, "<tr><th>{i}</th>");
        for cell in row.cells() {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

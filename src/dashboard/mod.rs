//! HTML dashboard: one table and one chart per pipeline, or a status
//! message when a pipeline has nothing to show.

pub mod charts;
pub mod table;

use std::fmt::Write;

use crate::models::{ActiveStorm, FeedOutcome, HistoricalStorm};
use crate::monitor::Snapshot;

pub use charts::{Figure, bubble_map, wind_line_chart};
pub use table::{TableRow, escape_html, render_table};

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cyclone Monitoring</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; background: #fafafa; color: #262730; }
        main { max-width: 1100px; margin: 0 auto; padding: 24px 32px 48px; }
        h1 { font-size: 2rem; margin: 16px 0 24px; }
        h2 { font-size: 1.4rem; margin: 32px 0 12px; }
        .alert { padding: 14px 18px; border-radius: 6px; margin: 16px 0; }
        .alert.success { background: #dff5e3; color: #17692b; }
        .alert.warning { background: #fff6d6; color: #8a6100; }
        .alert.error { background: #fde2e2; color: #a11a1a; }
        .table-wrap { max-height: 420px; overflow: auto; border: 1px solid #e6e6eb; border-radius: 6px; }
        table.data { border-collapse: collapse; width: 100%; font-size: 0.875rem; }
        table.data th, table.data td { padding: 6px 10px; border-bottom: 1px solid #f0f0f3; text-align: right; white-space: nowrap; }
        table.data td:first-of-type { text-align: left; }
        table.data thead th { position: sticky; top: 0; background: #f5f5f8; }
        .chart { margin-top: 20px; }
        footer { margin-top: 40px; font-size: 0.8rem; opacity: 0.6; }
    </style>
</head>
<body>
<main>
    <h1>🌪️ Real-Time &amp; Recent Cyclone Monitoring</h1>
{{LIVE}}
{{HISTORICAL}}
    <footer>Generated {{GENERATED_AT}}</footer>
</main>
</body>
</html>
"#;

/// Renders the full dashboard page for a snapshot.
///
/// `historical_limit` only affects headings; the snapshot already holds at
/// most that many storms.
pub fn render_page(snapshot: &Snapshot, historical_limit: usize) -> String {
    PAGE_TEMPLATE
        .replace("{{LIVE}}", &live_section(&snapshot.live))
        .replace(
            "{{HISTORICAL}}",
            &historical_section(&snapshot.historical, historical_limit),
        )
        .replace(
            "{{GENERATED_AT}}",
            &snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
}

fn live_section(outcome: &FeedOutcome<ActiveStorm>) -> String {
    match outcome {
        FeedOutcome::Data { records } => {
            let figure = bubble_map(records, "🌍 Real-Time Cyclone Tracking");
            data_section(
                "📌 Active Cyclones (Real-Time)",
                &render_table(records),
                "live-map",
                &figure,
            )
        }
        FeedOutcome::Empty => alert("success", "✅ No active cyclones detected."),
        FeedOutcome::Failed { reason } => alert(
            "error",
            &format!("⚠️ Error fetching real-time cyclone data: {reason}"),
        ),
    }
}

fn historical_section(outcome: &FeedOutcome<HistoricalStorm>, limit: usize) -> String {
    match outcome {
        FeedOutcome::Data { records } => {
            let figure =
                wind_line_chart(records, &format!("🌀 Wind Speed of Last {limit} Cyclones"));
            data_section(
                &format!("📜 Last {limit} Cyclones (Historical)"),
                &render_table(records),
                "historical-wind",
                &figure,
            )
        }
        FeedOutcome::Empty => alert(
            "warning",
            &format!(
                "⚠️ Could not retrieve the last {limit} cyclones: the archive had no complete observations."
            ),
        ),
        FeedOutcome::Failed { reason } => alert(
            "warning",
            &format!("⚠️ Could not retrieve the last {limit} cyclones: {reason}"),
        ),
    }
}

fn data_section(heading: &str, table: &str, chart_id: &str, figure: &Figure) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "    <section>");
    let _ = writeln!(html, "    <h2>{}</h2>", escape_html(heading));
    let _ = writeln!(html, "    <div class=\"table-wrap\">{table}</div>");
    let _ = writeln!(html, "    <div id=\"{chart_id}\" class=\"chart\"></div>");
    let _ = writeln!(
        html,
        "    <script>(function () {{ var fig = {}; Plotly.newPlot(\"{chart_id}\", fig.data, fig.layout, {{responsive: true}}); }})();</script>",
        figure.to_script_json()
    );
    let _ = write!(html, "    </section>");
    html
}

fn alert(level: &str, message: &str) -> String {
    format!(
        "    <div class=\"alert {level}\" role=\"status\">{}</div>",
        escape_html(message)
    )
}

// Standalone interactive HTML charts, one cumulative and one per-period,
// written under the output directory. Download is the trunk-to-port
// direction, i.e. the port's transmit counters.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use plotly::color::NamedColor;
use plotly::common::{Line, Mode};
use plotly::layout::{Axis, AxisType, Layout, Legend};
use plotly::{Plot, Scatter};

use crate::series::{RatePoint, TrafficPoint, to_gib, to_mib};

const DOWNLOAD_LABEL: &str = "下り";
const UPLOAD_LABEL: &str = "上り";

/// Writes `<selector>_acc.html`: cumulative totals in GB. Days of uptime push
/// the totals into the gigabyte range, so the cumulative chart uses the
/// bigger unit.
pub fn render_cumulative(
    points: &[TrafficPoint],
    selector_label: &str,
    outdir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = outdir.join(format!("{selector_label}_acc.html"));
    let timestamps = timestamps(points.iter().map(|p| p.timestamp));
    let down: Vec<f64> = points.iter().map(|p| to_gib(p.tx_bytes as f64)).collect();
    let up: Vec<f64> = points.iter().map(|p| to_gib(p.rx_bytes as f64)).collect();
    write_chart(
        timestamps,
        down,
        up,
        &format!("{selector_label} の累積データ量"),
        "データ量[GB]",
        "GB",
        outdir,
        &path,
    )?;
    Ok(path)
}

/// Writes `<selector>_diff.html`: per-period traffic in MB. Per-period deltas
/// stay in the megabyte range, so the rate chart keeps the smaller unit.
pub fn render_rate(
    points: &[RatePoint],
    selector_label: &str,
    period_label: &str,
    outdir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = outdir.join(format!("{selector_label}_diff.html"));
    let timestamps = timestamps(points.iter().map(|p| p.timestamp));
    let down: Vec<f64> = points.iter().map(|p| to_mib(p.tx_bytes)).collect();
    let up: Vec<f64> = points.iter().map(|p| to_mib(p.rx_bytes)).collect();
    write_chart(
        timestamps,
        down,
        up,
        &format!("{selector_label} の{period_label}毎データ量"),
        "データ量[MB]",
        "MB",
        outdir,
        &path,
    )?;
    Ok(path)
}

fn timestamps(iter: impl Iterator<Item = chrono::NaiveDateTime>) -> Vec<String> {
    iter.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn write_chart(
    timestamps: Vec<String>,
    down: Vec<f64>,
    up: Vec<f64>,
    title: &str,
    y_title: &str,
    unit: &str,
    outdir: &Path,
    path: &Path,
) -> anyhow::Result<()> {
    let y_max = down
        .iter()
        .chain(up.iter())
        .copied()
        .fold(0.0_f64, f64::max);
    let hover = format!("%{{x}}<br>%{{y:,.1f}}[{unit}]");

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(timestamps.clone(), down)
            .mode(Mode::Lines)
            .name(DOWNLOAD_LABEL)
            .line(Line::new().color(NamedColor::Green))
            .hover_template(&hover),
    );
    plot.add_trace(
        Scatter::new(timestamps, up)
            .mode(Mode::Lines)
            .name(UPLOAD_LABEL)
            .line(Line::new().color(NamedColor::Red))
            .hover_template(&hover),
    );
    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(
                Axis::new()
                    .title("時刻")
                    .type_(AxisType::Date)
                    .tick_format("%H:%M"),
            )
            .y_axis(
                Axis::new()
                    .title(y_title)
                    .range(vec![0.0, y_max * 1.1]),
            )
            // Legend in the top-left corner; clicking an entry toggles its
            // trace (plotly default behavior).
            .legend(Legend::new().x(0.0).y(1.0)),
    );

    fs::create_dir_all(outdir).with_context(|| format!("creating output dir {outdir:?}"))?;
    plot.write_html(path);
    tracing::debug!(operation = "write_chart", path = %path.display(), "chart written");
    Ok(())
}

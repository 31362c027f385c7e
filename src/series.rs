// Pure series math: selecting a port (or the non-trunk aggregate) out of the
// combined table, unit conversion, and first-difference rate derivation.

use chrono::NaiveDateTime;

use crate::models::Sample;

/// The uplink port; excluded from the aggregate so LAN traffic is not
/// counted twice (everything the LAN ports carry transits the trunk too).
pub const TRUNK_PORT: &str = "TA";

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// What to graph: one named port, or the sum of every non-trunk port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Port(String),
    Aggregate,
}

impl Selector {
    /// Label used in chart titles and output filenames.
    pub fn label(&self) -> &str {
        match self {
            Selector::Port(name) => name,
            Selector::Aggregate => "all",
        }
    }
}

/// One point of a cumulative byte series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficPoint {
    pub timestamp: NaiveDateTime,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// One point of a period-normalized rate series, in bytes per period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub timestamp: NaiveDateTime,
    pub rx_bytes: f64,
    pub tx_bytes: f64,
}

/// Extracts the cumulative byte series for `selector` from the combined
/// table. For `Aggregate`, rows are grouped by timestamp (consecutive in the
/// combined table, since each snapshot file carries one timestamp) and
/// counters are summed across all non-trunk ports.
pub fn select(samples: &[Sample], selector: &Selector) -> Vec<TrafficPoint> {
    let mut points: Vec<TrafficPoint> = Vec::new();
    for sample in samples {
        match selector {
            Selector::Port(name) => {
                if sample.record.port != *name {
                    continue;
                }
                points.push(TrafficPoint {
                    timestamp: sample.timestamp,
                    rx_bytes: sample.record.rx_bytes,
                    tx_bytes: sample.record.tx_bytes,
                });
            }
            Selector::Aggregate => {
                if sample.record.port == TRUNK_PORT {
                    continue;
                }
                match points.last_mut() {
                    Some(last) if last.timestamp == sample.timestamp => {
                        last.rx_bytes += sample.record.rx_bytes;
                        last.tx_bytes += sample.record.tx_bytes;
                    }
                    _ => points.push(TrafficPoint {
                        timestamp: sample.timestamp,
                        rx_bytes: sample.record.rx_bytes,
                        tx_bytes: sample.record.tx_bytes,
                    }),
                }
            }
        }
    }
    points
}

/// Derives the per-period rate series from a cumulative series.
///
/// For each consecutive pair the counter delta is scaled to the configured
/// period: delta * period_secs / elapsed_secs. The first sample has no
/// predecessor and is dropped, so the output is one shorter than the input.
/// Duplicate or out-of-order timestamps give a zero or negative elapsed time
/// and produce a garbage rate; that case is not guarded here.
pub fn rate_series(points: &[TrafficPoint], period_secs: u64) -> Vec<RatePoint> {
    points
        .windows(2)
        .map(|pair| {
            let elapsed = (pair[1].timestamp - pair[0].timestamp).num_seconds() as f64;
            let scale = period_secs as f64 / elapsed;
            RatePoint {
                timestamp: pair[1].timestamp,
                rx_bytes: (pair[1].rx_bytes as f64 - pair[0].rx_bytes as f64) * scale,
                tx_bytes: (pair[1].tx_bytes as f64 - pair[0].tx_bytes as f64) * scale,
            }
        })
        .collect()
}

pub fn to_mib(bytes: f64) -> f64 {
    bytes / MIB
}

pub fn to_gib(bytes: f64) -> f64 {
    bytes / GIB
}

/// Human label for the reporting period: the largest of day/hour/minute that
/// divides it evenly, with a fractional hour count as the fallback.
pub fn period_label(period_secs: u64) -> String {
    for (unit_secs, unit) in [(86_400, "日"), (3_600, "時間"), (60, "分")] {
        if period_secs >= unit_secs && period_secs % unit_secs == 0 {
            return format!("{}{unit}", period_secs / unit_secs);
        }
    }
    format!("{}時間", period_secs as f64 / 3_600.0)
}

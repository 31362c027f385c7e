// Port counter records as the F660A status page reports them.
// Column labels are the device's own (Japanese) table headings; the CSV
// snapshot format binds to them verbatim so logs stay readable next to
// the router's web UI.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The status-page table columns, in on-page order. The first column starts
/// a new record during the table walk; the rest are counters.
pub const COLUMNS: [&str; 9] = [
    "ポート名",
    "受信したデータ量(byte)",
    "受信したパケットの総数",
    "マルチキャストパケットの受信数",
    "ブロードキャストパケットの受信数",
    "送信したデータ量(byte)",
    "送信されたパケットの総数",
    "マルチキャストパケットの送信数",
    "ブロードキャストパケットの送信数",
];

/// Counters for one port at one capture instant. All counters are cumulative
/// totals since device boot; they only carry meaning as differences between
/// consecutive snapshots of the same port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    #[serde(rename = "ポート名")]
    pub port: String,
    #[serde(rename = "受信したデータ量(byte)")]
    pub rx_bytes: u64,
    #[serde(rename = "受信したパケットの総数")]
    pub rx_packets: u64,
    #[serde(rename = "マルチキャストパケットの受信数")]
    pub rx_multicast: u64,
    #[serde(rename = "ブロードキャストパケットの受信数")]
    pub rx_broadcast: u64,
    #[serde(rename = "送信したデータ量(byte)")]
    pub tx_bytes: u64,
    #[serde(rename = "送信されたパケットの総数")]
    pub tx_packets: u64,
    #[serde(rename = "マルチキャストパケットの送信数")]
    pub tx_multicast: u64,
    #[serde(rename = "ブロードキャストパケットの送信数")]
    pub tx_broadcast: u64,
}

/// One row of the combined log table: a port record tagged with the capture
/// timestamp of the snapshot file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub record: PortRecord,
}

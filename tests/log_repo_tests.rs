// Log directory aggregation tests: file ordering, timestamp tagging, and
// hard failure on malformed input.

use std::fs;

use chrono::NaiveDateTime;
use f660a_monitor::log_repo::{parse_filename_timestamp, read_logs, write_csv};
use f660a_monitor::models::PortRecord;
use tempfile::tempdir;

const HEADER: &str = "ポート名, 受信したデータ量(byte), 受信したパケットの総数, マルチキャストパケットの受信数, ブロードキャストパケットの受信数, 送信したデータ量(byte), 送信されたパケットの総数, マルチキャストパケットの送信数, ブロードキャストパケットの送信数";

fn snapshot_body(rows: &[(&str, u64, u64)]) -> String {
    let mut body = format!("{HEADER}\n");
    for (port, rx, tx) in rows {
        body.push_str(&format!("{port}, {rx}, 1, 0, 0, {tx}, 2, 0, 0\n"));
    }
    body
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("test timestamp")
}

#[test]
fn test_read_logs_row_count_and_order() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("20240101_000000.csv"),
        snapshot_body(&[("LAN1", 10, 20), ("TA", 30, 40)]),
    )
    .expect("write");
    fs::write(
        dir.path().join("20240101_010000.csv"),
        snapshot_body(&[("LAN1", 110, 120), ("TA", 130, 140)]),
    )
    .expect("write");

    let samples = read_logs(dir.path()).expect("read_logs");
    // Sum of per-file row counts, in file order then row order.
    assert_eq!(samples.len(), 4);
    let order: Vec<(&str, NaiveDateTime)> = samples
        .iter()
        .map(|s| (s.record.port.as_str(), s.timestamp))
        .collect();
    assert_eq!(
        order,
        vec![
            ("LAN1", ts("2024-01-01 00:00:00")),
            ("TA", ts("2024-01-01 00:00:00")),
            ("LAN1", ts("2024-01-01 01:00:00")),
            ("TA", ts("2024-01-01 01:00:00")),
        ]
    );
    assert_eq!(samples[0].record.rx_bytes, 10);
    assert_eq!(samples[2].record.tx_bytes, 120);
}

#[test]
fn test_read_logs_ignores_non_csv_files() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("20240101_000000.csv"),
        snapshot_body(&[("LAN1", 1, 2)]),
    )
    .expect("write");
    fs::write(dir.path().join("README.txt"), "not a snapshot").expect("write");

    let samples = read_logs(dir.path()).expect("read_logs");
    assert_eq!(samples.len(), 1);
}

#[test]
fn test_read_logs_rejects_malformed_filename() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("latest.csv"),
        snapshot_body(&[("LAN1", 1, 2)]),
    )
    .expect("write");

    let err = read_logs(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("latest.csv"));
}

#[test]
fn test_read_logs_rejects_malformed_header() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("20240101_000000.csv"),
        "port, rx, tx\nLAN1, 1, 2\n",
    )
    .expect("write");

    assert!(read_logs(dir.path()).is_err());
}

#[test]
fn test_read_logs_rejects_non_numeric_counter() {
    let dir = tempdir().expect("tempdir");
    let body = snapshot_body(&[("LAN1", 1, 2)]).replace(", 1,", ", x,");
    fs::write(dir.path().join("20240101_000000.csv"), body).expect("write");

    assert!(read_logs(dir.path()).is_err());
}

#[test]
fn test_parse_filename_timestamp() {
    let parsed = parse_filename_timestamp("20240131_235959.csv").expect("parse");
    assert_eq!(parsed, ts("2024-01-31 23:59:59"));
    assert!(parse_filename_timestamp("2024-01-31.csv").is_err());
    assert!(parse_filename_timestamp("20240131_2359.csv").is_err());
}

#[test]
fn test_write_csv_emits_device_header() {
    let records = vec![PortRecord {
        port: "LAN1".to_string(),
        rx_bytes: 1,
        rx_packets: 2,
        rx_multicast: 3,
        rx_broadcast: 4,
        tx_bytes: 5,
        tx_packets: 6,
        tx_multicast: 7,
        tx_broadcast: 8,
    }];
    let mut out = Vec::new();
    write_csv(&records, &mut out).expect("write_csv");
    let text = String::from_utf8(out).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER.replace(", ", ",").as_str()));
    assert_eq!(lines.next(), Some("LAN1,1,2,3,4,5,6,7,8"));
}

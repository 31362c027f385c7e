// Pure extraction from the router's pages: login tokens out of the inline
// script, and the counter table walk. No I/O here so the firmware's page
// quirks can be pinned down in tests.

use std::collections::HashMap;

use regex::Regex;
use scraper::{Html, Selector};

use super::ScrapeError;
use crate::models::PortRecord;

// The login page emits both tokens via creatHiddenInput(...) calls in an
// inline script (sic, the firmware misspells "create").
const LOGIN_TOKEN_PATTERN: &str = r#"creatHiddenInput\("Frm_Logintoken", *"(\d+)"\)"#;
const LOGIN_CHECK_TOKEN_PATTERN: &str = r#"creatHiddenInput\("Frm_Loginchecktoken", *"(\d+)"\)"#;

/// The two CSRF-like tokens scraped from the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    pub login: String,
    pub login_check: String,
}

/// Extracts both login tokens from the login page HTML.
pub fn login_tokens(html: &str) -> Result<LoginTokens, ScrapeError> {
    let login = capture(LOGIN_TOKEN_PATTERN, html).ok_or(ScrapeError::LoginToken)?;
    let login_check =
        capture(LOGIN_CHECK_TOKEN_PATTERN, html).ok_or(ScrapeError::LoginCheckToken)?;
    Ok(LoginTokens { login, login_check })
}

fn capture(pattern: &str, html: &str) -> Option<String> {
    let re = Regex::new(pattern).expect("static pattern");
    re.captures(html).map(|c| c[1].to_string())
}

/// Walks the status page's `<td>` cells in document order and rebuilds one
/// record per port.
///
/// The page lays each port out as alternating label/value cells: a cell whose
/// text equals a known column label marks the next cell as that column's
/// value, and the port-name label starts a new record (flushing the previous
/// one). Any cell that fails to parse as its column's counter aborts the walk.
pub fn port_table(html: &str, columns: &[&str]) -> Result<Vec<PortRecord>, ScrapeError> {
    let label_index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, i))
        .collect();

    let doc = Html::parse_document(html);
    let td = Selector::parse("td").expect("static selector");

    let mut records: Vec<PortRecord> = Vec::new();
    let mut cells: Option<Vec<String>> = None;
    let mut pending: Option<usize> = None;
    for node in doc.select(&td) {
        let text = node.text().collect::<String>();
        let text = text.trim();
        if let Some(i) = pending.take() {
            let cells = cells
                .as_mut()
                .ok_or_else(|| ScrapeError::Table("value cell before any port row".into()))?;
            cells[i] = text.to_string();
        } else if let Some(&i) = label_index.get(text) {
            if i == 0
                && let Some(done) = cells.take()
            {
                records.push(record_from_cells(&done, columns)?);
            }
            if i == 0 {
                cells = Some(vec![String::new(); columns.len()]);
            }
            pending = Some(i);
        }
    }
    if let Some(done) = cells.take() {
        records.push(record_from_cells(&done, columns)?);
    }
    if records.is_empty() {
        return Err(ScrapeError::Table("no port rows found".into()));
    }
    Ok(records)
}

fn record_from_cells(cells: &[String], columns: &[&str]) -> Result<PortRecord, ScrapeError> {
    let counter = |i: usize| {
        cells[i].parse::<u64>().map_err(|_| {
            ScrapeError::Table(format!(
                "column {:?} has non-numeric value {:?}",
                columns[i], cells[i]
            ))
        })
    };
    Ok(PortRecord {
        port: cells[0].clone(),
        rx_bytes: counter(1)?,
        rx_packets: counter(2)?,
        rx_multicast: counter(3)?,
        rx_broadcast: counter(4)?,
        tx_bytes: counter(5)?,
        tx_packets: counter(6)?,
        tx_multicast: counter(7)?,
        tx_broadcast: counter(8)?,
    })
}

// F660A web admin scrape: login handshake + status page fetch.
// The handshake is dictated by the device firmware and is intentionally
// brittle; any deviation from the expected page structure aborts the run
// with a stage-specific exit code.

pub mod parse;

use anyhow::Context;
use md5::{Digest, Md5};
use rand::Rng;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::models::{COLUMNS, PortRecord};

const STATUS_PAGE: &str = "getpage.gch?pid=1002&nextpage=pon_status_lan_link_info_t.gch";

/// Scrape stage failures, one per handshake step. Exit codes match the
/// stage order so the scheduler's logs show where a run died.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("login page did not contain Frm_Logintoken")]
    LoginToken,
    #[error("login page did not contain Frm_Loginchecktoken")]
    LoginCheckToken,
    #[error("login POST was not redirected (status {0})")]
    LoginRejected(StatusCode),
    #[error("status page fetch failed (status {0})")]
    StatusPage(StatusCode),
    #[error("status page table walk failed: {0}")]
    Table(String),
}

impl ScrapeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ScrapeError::LoginToken => 1,
            ScrapeError::LoginCheckToken => 2,
            ScrapeError::LoginRejected(_) => 3,
            ScrapeError::StatusPage(_) | ScrapeError::Table(_) => 4,
        }
    }
}

/// The login hash the firmware's login.js computes client-side: the password
/// concatenated with a random 8-digit salt, MD5-hashed, lowercase hex. The
/// salt travels alongside in the form as UserRandomNum.
pub fn hashed_password(password: &str, salt: u64) -> String {
    format!("{:x}", Md5::digest(format!("{password}{salt}")))
}

/// Cookie-carrying HTTP session against one router.
pub struct RouterRepo {
    client: Client,
    base_url: String,
}

impl RouterRepo {
    /// Builds the session. Redirects are disabled globally: the login POST
    /// answers with a 302 that must be observed, not followed.
    pub fn connect(hostip: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: format!("http://{hostip}/"),
        })
    }

    /// Runs the three-step handshake and returns the parsed port table.
    ///
    /// 1. GET / and scrape the two login tokens out of the page script.
    /// 2. POST credentials (password salted with a random 8-digit number and
    ///    MD5-hashed, per the firmware's login.js) and expect a 302.
    /// 3. GET the LAN link info page and walk its counter table.
    pub fn fetch_port_counters(
        &self,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Vec<PortRecord>> {
        let login_page = self
            .client
            .get(&self.base_url)
            .send()
            .context("fetching login page")?
            .text()
            .context("reading login page body")?;
        let tokens = parse::login_tokens(&login_page)?;
        tracing::debug!(operation = "login_tokens", "login tokens scraped");

        let salt: u64 = rand::thread_rng().gen_range(10_000_000..=99_999_999);
        let hashed = hashed_password(password, salt);

        let salt_str = salt.to_string();
        let form = [
            ("action", "login"),
            ("Username", username),
            ("Password", hashed.as_str()),
            ("Frm_Logintoken", tokens.login.as_str()),
            ("UserRandomNum", salt_str.as_str()),
            ("Frm_Loginchecktoken", tokens.login_check.as_str()),
        ];
        let res = self
            .client
            .post(&self.base_url)
            .form(&form)
            .send()
            .context("posting login form")?;
        if res.status() != StatusCode::FOUND {
            return Err(ScrapeError::LoginRejected(res.status()).into());
        }
        tracing::debug!(operation = "login", "login accepted");

        let res = self
            .client
            .get(format!("{}{STATUS_PAGE}", self.base_url))
            .send()
            .context("fetching status page")?;
        if res.status() != StatusCode::OK {
            return Err(ScrapeError::StatusPage(res.status()).into());
        }
        let body = res.text().context("reading status page body")?;
        let records = parse::port_table(&body, &COLUMNS)?;
        tracing::debug!(
            operation = "port_table",
            ports = records.len(),
            "port table parsed"
        );
        Ok(records)
    }
}

//! Async HTTP client for the vulnerability-management API.
//!
//! [`licenses::fetch_high_severity`] returns `Ok(Some(findings))` on a `200`,
//! `Ok(None)` when the API answered with any other status, and `Err` on
//! network failures or a body that does not have the expected shape.

pub mod licenses;

use anyhow::Result;
use reqwest::Client;

/// Build the shared client used for every request of a run.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("license-monitor/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

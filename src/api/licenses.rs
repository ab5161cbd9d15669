use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::models::LicenseFinding;

/// The only severity the reports surface. Compared case-sensitively.
pub const HIGH_SEVERITY: &str = "high";

/// Build the license-list URL for an organization.
pub fn licenses_url(api_url: &str, org_id: &str) -> String {
    format!(
        "{}/v1/org/{}/licenses?sortBy=license&order=asc",
        api_url, org_id
    )
}

/// Fetch the license list for one organization and keep only high severity findings.
///
/// A non-200 answer is logged with its status and body and reported as
/// `Ok(None)` so the caller can move on to the next organization.
pub async fn fetch_high_severity(
    client: &Client,
    api_url: &str,
    org_id: &str,
    token: &str,
) -> Result<Option<Vec<LicenseFinding>>> {
    let url = licenses_url(api_url, org_id);
    tracing::debug!(org_id, %url, "fetching licenses");

    let response = client
        .post(&url)
        .header("Authorization", format!("Token {}", token))
        .header("Content-Type", "application/json")
        .send()
        .await
        .with_context(|| format!("requesting licenses for organization {}", org_id))?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(org_id, status = status.as_u16(), %body, "license request failed");
        return Ok(None);
    }

    let data: Value = response
        .json()
        .await
        .with_context(|| format!("decoding license list for organization {}", org_id))?;

    let findings = filter_high_severity(&data)
        .with_context(|| format!("reading license list for organization {}", org_id))?;
    tracing::debug!(org_id, count = findings.len(), "high severity findings");

    Ok(Some(findings))
}

/// Select the high severity entries of a license-list body.
///
/// A body without `results` yields an empty list. Every entry must carry a
/// `severity`; only the retained entries are required to have the remaining
/// finding fields.
pub fn filter_high_severity(body: &Value) -> Result<Vec<LicenseFinding>> {
    let results = match body.get("results") {
        Some(Value::Array(results)) => results.as_slice(),
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(_) => return Err(anyhow!("`results` is not an array")),
    };

    let mut findings = Vec::new();
    for (index, entry) in results.iter().enumerate() {
        let severity = entry
            .get("severity")
            .ok_or_else(|| anyhow!("result {} has no `severity`", index))?;

        if severity.as_str() != Some(HIGH_SEVERITY) {
            continue;
        }

        let finding: LicenseFinding = serde_json::from_value(entry.clone())
            .with_context(|| format!("result {} is not a valid license finding", index))?;
        findings.push(finding);
    }

    Ok(findings)
}

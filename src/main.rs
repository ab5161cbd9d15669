//! `license-monitor` — collect high severity license findings for a set of organizations.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config, then apply env and CLI overrides ([`config`]).
//! 3. For each organization: spinner, fetch ([`api::licenses`]), write CSV
//!    ([`report::csv_export`]) and remember the findings.
//! 4. Print the aggregate total and the summary table ([`report::terminal`])
//!    from the remembered findings.

mod api;
mod cli;
mod config;
mod logging;
mod models;
mod report;
#[cfg(test)]
mod test_support;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use config::{load_config, Config};
use models::LicenseFinding;
use report::{csv_export, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_cli(&cli);
    config.validate()?;

    let outcome = run(&config, cli.quiet).await?;
    tracing::debug!(reports = outcome.reports.len(), "csv reports written");

    terminal::render_summary(
        &config.organizations,
        &outcome.findings_by_org,
        outcome.total,
    );

    Ok(())
}

/// What a pass over the organization list produced.
struct RunOutcome {
    /// Sum of high severity findings over organizations whose fetch succeeded.
    total: usize,
    /// Findings keyed by organization id; organizations with a failed fetch are absent.
    findings_by_org: HashMap<String, Vec<LicenseFinding>>,
    reports: Vec<PathBuf>,
}

/// Process the organizations one at a time, in configured order.
async fn run(config: &Config, quiet: bool) -> Result<RunOutcome> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let client = api::build_client()?;

    let mut outcome = RunOutcome {
        total: 0,
        findings_by_org: HashMap::new(),
        reports: Vec::new(),
    };

    for org in &config.organizations {
        if !quiet {
            terminal::show_progress(org).await?;
        }

        let Some(findings) =
            api::licenses::fetch_high_severity(&client, &config.api_url, &org.id, config.token())
                .await?
        else {
            continue;
        };

        if let Some(path) = csv_export::write_findings(&config.output_dir, &org.name, &findings)? {
            if !quiet {
                terminal::report_written(org, &path, &findings);
            }
            outcome.reports.push(path);
        }

        outcome.total += findings.len();
        outcome.findings_by_org.insert(org.id.clone(), findings);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;
    use crate::test_support::{MockApi, Route};
    use serde_json::json;
    use tempfile::TempDir;

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn config(api: &MockApi, dir: &TempDir, organizations: Vec<Organization>) -> Config {
        let mut config = Config {
            api_url: api.base_url.clone(),
            token: Some("secret".to_string()),
            organizations,
            output_dir: dir.path().to_path_buf(),
        };
        config.validate().unwrap();
        config
    }

    #[tokio::test]
    async fn test_run_continues_past_failed_organization() {
        let high = json!({
            "results": [{
                "id": 1,
                "severity": "high",
                "instructions": "x",
                "dependencies": ["a"],
                "projects": [{"id": 10, "name": "P1"}, {"id": 11, "name": "P2"}]
            }]
        });
        let low = json!({"results": [{"id": 2, "severity": "low"}]});
        let api = MockApi::start(vec![
            Route { org_id: "broken", status_line: "500 Internal Server Error", body: "oops".to_string() },
            Route { org_id: "acme", status_line: "200 OK", body: high.to_string() },
            Route { org_id: "quiet", status_line: "200 OK", body: low.to_string() },
        ])
        .await;
        let dir = TempDir::new().unwrap();
        let cfg = config(
            &api,
            &dir,
            vec![org("broken", "Broken"), org("acme", "Acme"), org("quiet", "Quiet")],
        );

        let outcome = run(&cfg, true).await.unwrap();

        assert_eq!(outcome.total, 1);
        assert_eq!(api.requests().len(), 3);
        assert!(!outcome.findings_by_org.contains_key("broken"));
        assert_eq!(outcome.findings_by_org["acme"].len(), 1);
        assert!(outcome.findings_by_org["quiet"].is_empty());

        assert_eq!(
            outcome.reports,
            vec![dir.path().join("Acme_high_severity_licenses.csv")]
        );
        assert!(!dir.path().join("Broken_high_severity_licenses.csv").exists());
        assert!(!dir.path().join("Quiet_high_severity_licenses.csv").exists());

        let csv = std::fs::read_to_string(&outcome.reports[0]).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_summary_uses_first_pass_without_refetching() {
        let body = json!({"results": []}).to_string();
        let api = MockApi::start(vec![Route { org_id: "acme", status_line: "200 OK", body }]).await;
        let dir = TempDir::new().unwrap();
        let cfg = config(&api, &dir, vec![org("acme", "Acme")]);

        let outcome = run(&cfg, true).await.unwrap();
        let table = terminal::summary_table(&cfg.organizations, &outcome.findings_by_org);

        assert_eq!(table.row_iter().count(), 1);
        assert_eq!(api.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_aborts_run() {
        let api = MockApi::start(vec![Route {
            org_id: "acme",
            status_line: "200 OK",
            body: r#"{"results": [{"id": 1}]}"#.to_string(),
        }])
        .await;
        let dir = TempDir::new().unwrap();
        let cfg = config(&api, &dir, vec![org("acme", "Acme")]);

        assert!(run(&cfg, true).await.is_err());
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::models::Organization;

#[derive(Parser, Debug)]
#[command(
    name = "license-monitor",
    about = "Report high severity license findings across organizations",
    version
)]
pub struct Cli {
    /// Config file [default: ./.license-monitor/config.toml, fallback ~/.config/license-monitor/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and LICENSE_MONITOR_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Organization to check, as ID=NAME (repeatable; replaces the configured list)
    #[arg(long = "org", value_name = "ID=NAME", value_parser = parse_organization)]
    pub orgs: Vec<Organization>,

    /// Directory the CSV reports are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the progress spinner and per-file messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse an `ID=NAME` pair. The name may itself contain `=`.
pub fn parse_organization(value: &str) -> Result<Organization, String> {
    let (id, name) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=NAME, got `{}`", value))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("organization id is empty in `{}`", value));
    }

    Ok(Organization {
        id: id.to_string(),
        name: name.trim().to_string(),
    })
}

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::models::Organization;

pub const ENV_API_URL: &str = "LICENSE_MONITOR_API_URL";
pub const ENV_TOKEN: &str = "LICENSE_MONITOR_TOKEN";

const DEFAULT_API_URL: &str = "https://snyk.io/api";

/// Root configuration structure, deserialized from `.license-monitor/config.toml`.
///
/// ```toml
/// api_url = "https://snyk.io/api"
/// output_dir = "reports"
///
/// [[organizations]]
/// id = "4a18d42f-0706-4ad0-b127-24078731fbed"
/// name = "platform"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    /// API base URL; the `/v1/org/...` path is appended to it.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Token sent as `Authorization: Token <token>`. Prefer the
    /// `LICENSE_MONITOR_TOKEN` environment variable over storing it here.
    #[serde(default)]
    pub token: Option<String>,
    /// Organizations to check, in report order.
    #[serde(default)]
    pub organizations: Vec<Organization>,
    /// Directory the CSV reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            token: None,
            organizations: Vec::new(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    /// Apply command-line overrides, which take precedence over everything else.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if !cli.orgs.is_empty() {
            self.organizations = cli.orgs.clone();
        }
    }

    /// Check that the configuration is usable and normalize the API URL.
    pub fn validate(&mut self) -> Result<()> {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            bail!("no API URL configured (set api_url, {} or --api-url)", ENV_API_URL);
        }
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            bail!("no API token configured (set token or {})", ENV_TOKEN);
        }
        if self.organizations.is_empty() {
            bail!("no organizations configured (add [[organizations]] or pass --org ID=NAME)");
        }
        Ok(())
    }

    /// The validated token. Only meaningful after [`Config::validate`].
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.license-monitor/config.toml`
/// 3. `~/.config/license-monitor/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".license-monitor").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-monitor")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

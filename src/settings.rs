//! Resolved run settings
//!
//! Command line flags and `EZPKGM_*` environment variables are merged by clap;
//! this module validates the result once so the rest of the program works
//! with typed values.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Result, config_invalid};
use crate::fetcher::UrlTemplate;

/// Local registry file, relative to the working directory
pub const DEFAULT_REGISTRY_PATH: &str = "config.json";

/// Canonical remote registry
pub const DEFAULT_REMOTE_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/ezpkgm/ezpkgm/main/config.json";

/// Identifies the tool on every HTTP request
pub const USER_AGENT: &str = "ezpkgm-package-manager/1.0";

#[derive(Debug, Clone)]
pub struct Settings {
    pub registry_path: PathBuf,
    pub remote_url: String,
    pub url_template: UrlTemplate,
    pub download_dir: PathBuf,
    pub max_redirects: usize,
    /// Reconcile with the remote registry before installing
    pub sync: bool,
    /// Answer the overwrite question with yes
    pub assume_yes: bool,
    pub user_agent: String,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let remote_url = validate_remote_url(&cli.remote_url)?;
        let url_template = UrlTemplate::parse(&cli.url_template)?;

        Ok(Self {
            registry_path: cli.config.clone(),
            remote_url,
            url_template,
            download_dir: cli.download_dir.clone(),
            max_redirects: cli.max_redirects,
            sync: !cli.no_sync,
            assume_yes: cli.yes,
            user_agent: USER_AGENT.to_string(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            remote_url: DEFAULT_REMOTE_REGISTRY_URL.to_string(),
            url_template: UrlTemplate::default(),
            download_dir: PathBuf::from("."),
            max_redirects: crate::fetcher::DEFAULT_MAX_REDIRECTS,
            sync: true,
            assume_yes: false,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

fn validate_remote_url(url: &str) -> Result<String> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
        Ok(parsed) => Err(config_invalid(format!(
            "remote registry URL '{url}' uses unsupported scheme '{}'",
            parsed.scheme()
        ))),
        Err(e) => Err(config_invalid(format!(
            "remote registry URL '{url}' is not a valid URL: {e}"
        ))),
    }
}

//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::fetcher::DEFAULT_MAX_REDIRECTS;
use crate::fetcher::template::DEFAULT_URL_TEMPLATE;
use crate::settings::{DEFAULT_REGISTRY_PATH, DEFAULT_REMOTE_REGISTRY_URL};

/// ezpkgm - tagged source archive installer
///
/// Installs a project listed in the local registry by downloading its tagged
/// source archive and extracting it into the project's Origin directory.
#[derive(Parser, Debug)]
#[command(
    name = "ezpkgm",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install tagged source archives listed in a local registry",
    long_about = None,
    after_help = "EXAMPLES:\n  \
                  Install a project:\n    ezpkgm foo\n\n\
                  Install without checking the remote registry:\n    ezpkgm foo --no-sync\n\n\
                  Accept a registry update without prompting:\n    ezpkgm foo --yes\n\n\
                  Use a per-project namespace:\n    ezpkgm foo --url-template \
                  'https://github.com/{project}/{repo}/archive/refs/tags/{version}.zip'"
)]
pub struct Cli {
    /// Project to install, as named in the registry
    pub project: Option<String>,

    /// Local registry file
    #[arg(
        long,
        short = 'c',
        env = "EZPKGM_CONFIG",
        value_name = "PATH",
        default_value = DEFAULT_REGISTRY_PATH
    )]
    pub config: PathBuf,

    /// Canonical remote registry
    #[arg(
        long,
        env = "EZPKGM_REMOTE_URL",
        value_name = "URL",
        default_value = DEFAULT_REMOTE_REGISTRY_URL
    )]
    pub remote_url: String,

    /// Archive location; placeholders: {project}, {repo}, {version}
    #[arg(
        long,
        env = "EZPKGM_URL_TEMPLATE",
        value_name = "TEMPLATE",
        default_value = DEFAULT_URL_TEMPLATE
    )]
    pub url_template: String,

    /// Directory the archive is downloaded into before extraction
    #[arg(
        long,
        env = "EZPKGM_DOWNLOAD_DIR",
        value_name = "DIR",
        default_value = "."
    )]
    pub download_dir: PathBuf,

    /// Maximum number of redirects followed per download
    #[arg(
        long,
        env = "EZPKGM_MAX_REDIRECTS",
        value_name = "N",
        default_value_t = DEFAULT_MAX_REDIRECTS
    )]
    pub max_redirects: usize,

    /// Skip synchronizing the registry with the remote copy
    #[arg(long, env = "EZPKGM_NO_SYNC")]
    pub no_sync: bool,

    /// Overwrite the local registry without asking when the remote copy differs
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

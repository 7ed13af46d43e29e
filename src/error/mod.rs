//! Error types and handling for ezpkgm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors are grouped by the phase that raises them:
//! - [`registry`]: loading, saving and syncing the project registry
//! - [`fetch`]: resolving and downloading archives
//! - [`fs`]: extraction and file system access

pub mod fetch;
pub mod fs;
pub mod registry;

pub use fetch::{
    http_status, missing_redirect_location, network as network_error, too_many_redirects,
};
pub use fs::{extraction_failed, filesystem_error};
pub use registry::{
    config_invalid, config_load_failed, config_write_failed, project_not_found, prompt_failed,
    remote_fetch_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ezpkgm operations
#[derive(Error, Diagnostic, Debug)]
pub enum EzpkgmError {
    // Registry errors
    #[error("Failed to load registry from '{path}': {reason}")]
    #[diagnostic(
        code(ezpkgm::registry::load_failed),
        help("The installer continues with an empty registry")
    )]
    ConfigLoad { path: String, reason: String },

    #[error("Failed to write registry to '{path}': {reason}")]
    #[diagnostic(code(ezpkgm::registry::write_failed))]
    ConfigWrite { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(ezpkgm::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to fetch remote registry from {url}: {reason}")]
    #[diagnostic(
        code(ezpkgm::registry::remote_fetch_failed),
        help("The local registry is used unchanged")
    )]
    RemoteFetch { url: String, reason: String },

    #[error("Project '{name}' not found in registry")]
    #[diagnostic(
        code(ezpkgm::registry::project_not_found),
        help("Check the project name, or sync the registry with the remote copy")
    )]
    ProjectNotFound { name: String },

    // Fetch errors
    #[error("Network error while requesting {url}: {reason}")]
    #[diagnostic(code(ezpkgm::fetch::network))]
    Network { url: String, reason: String },

    #[error("Failed to download {url}: HTTP status {status}")]
    #[diagnostic(code(ezpkgm::fetch::http_status))]
    HttpStatus { url: String, status: u16 },

    #[error("Too many redirects while downloading {url} (limit is {max})")]
    #[diagnostic(
        code(ezpkgm::fetch::too_many_redirects),
        help("Raise --max-redirects if the chain is legitimate")
    )]
    TooManyRedirects { url: String, max: usize },

    #[error("Redirect from {url} (HTTP {status}) has no usable Location header")]
    #[diagnostic(code(ezpkgm::fetch::missing_location))]
    MissingRedirectLocation { url: String, status: u16 },

    // Install errors
    #[error("Failed to extract archive '{path}': {reason}")]
    #[diagnostic(
        code(ezpkgm::install::extraction_failed),
        help("The archive was left in place for inspection")
    )]
    Extraction { path: String, reason: String },

    #[error("File system error at '{path}': {reason}")]
    #[diagnostic(code(ezpkgm::fs::error))]
    Filesystem { path: String, reason: String },

    #[error("Failed to read confirmation: {reason}")]
    #[diagnostic(code(ezpkgm::prompt::failed))]
    Prompt { reason: String },
}

impl From<inquire::InquireError> for EzpkgmError {
    fn from(err: inquire::InquireError) -> Self {
        EzpkgmError::Prompt {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, EzpkgmError>;

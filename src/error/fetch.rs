//! Archive download errors

use super::EzpkgmError;

/// Creates a network error
pub fn network(url: impl Into<String>, reason: impl Into<String>) -> EzpkgmError {
    EzpkgmError::Network {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates an unexpected HTTP status error
pub fn http_status(url: impl Into<String>, status: u16) -> EzpkgmError {
    EzpkgmError::HttpStatus {
        url: url.into(),
        status,
    }
}

/// Creates a redirect limit error
pub fn too_many_redirects(url: impl Into<String>, max: usize) -> EzpkgmError {
    EzpkgmError::TooManyRedirects {
        url: url.into(),
        max,
    }
}

/// Creates a redirect-without-location error
pub fn missing_redirect_location(url: impl Into<String>, status: u16) -> EzpkgmError {
    EzpkgmError::MissingRedirectLocation {
        url: url.into(),
        status,
    }
}

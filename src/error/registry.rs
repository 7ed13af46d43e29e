//! Registry and configuration errors

use super::EzpkgmError;

/// Creates a registry load failed error
pub fn config_load_failed(path: impl Into<String>, reason: impl Into<String>) -> EzpkgmError {
    EzpkgmError::ConfigLoad {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a registry write failed error
pub fn config_write_failed(path: impl Into<String>, reason: impl Into<String>) -> EzpkgmError {
    EzpkgmError::ConfigWrite {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn config_invalid(message: impl Into<String>) -> EzpkgmError {
    EzpkgmError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a remote registry fetch error
pub fn remote_fetch_failed(url: impl Into<String>, reason: impl Into<String>) -> EzpkgmError {
    EzpkgmError::RemoteFetch {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a project not found error
pub fn project_not_found(name: impl Into<String>) -> EzpkgmError {
    EzpkgmError::ProjectNotFound { name: name.into() }
}

/// Creates a confirmation prompt error
pub fn prompt_failed(reason: impl ToString) -> EzpkgmError {
    EzpkgmError::Prompt {
        reason: reason.to_string(),
    }
}

//! Extraction and file system errors

use std::path::Path;

use super::EzpkgmError;

/// Creates an archive extraction error
pub fn extraction_failed(path: impl AsRef<Path>, reason: impl ToString) -> EzpkgmError {
    EzpkgmError::Extraction {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file system error
pub fn filesystem_error(path: impl AsRef<Path>, reason: impl ToString) -> EzpkgmError {
    EzpkgmError::Filesystem {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

//! Archive installation
//!
//! Extracts a downloaded ZIP archive into a project's destination directory
//! and removes the archive afterwards. When extraction fails the archive is
//! kept so it can be inspected.
//!
//! Existing files at the destination are overwritten; existing directories
//! are reused. Entries that would land outside the destination are refused.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{Result, extraction_failed, filesystem_error};
use crate::ui;

/// Summary of a finished installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub destination: PathBuf,
    /// Number of files written
    pub files: usize,
}

/// Extract `archive` into `destination`, then delete `archive`
pub async fn install(archive: &Path, destination: &Path) -> Result<InstallReport> {
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|e| filesystem_error(destination, e))?;

    let archive_owned = archive.to_path_buf();
    let destination_owned = destination.to_path_buf();
    let files =
        tokio::task::spawn_blocking(move || extract_archive(&archive_owned, &destination_owned))
            .await
            .map_err(|e| extraction_failed(archive, e))??;

    ui::success(format!(
        "Unzipped {} to {} ({files} file(s))",
        archive.display(),
        destination.display()
    ));

    tokio::fs::remove_file(archive)
        .await
        .map_err(|e| filesystem_error(archive, e))?;
    ui::info(format!("Removed archive {}", archive.display()));

    Ok(InstallReport {
        destination: destination.to_path_buf(),
        files,
    })
}

/// Extract every entry of `archive` below `destination`, returning the file count
pub fn extract_archive(archive: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive).map_err(|e| extraction_failed(archive, e))?;
    let mut zip =
        ZipArchive::new(BufReader::new(file)).map_err(|e| extraction_failed(archive, e))?;

    let mut files = 0;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| extraction_failed(archive, e))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(extraction_failed(
                archive,
                format!("entry '{}' escapes the destination directory", entry.name()),
            ));
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| filesystem_error(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| filesystem_error(parent, e))?;
        }

        let mut out = File::create(&target).map_err(|e| filesystem_error(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| extraction_failed(archive, e))?;

        // Owner write stays set so a reinstall can overwrite the file.
        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode((mode & 0o7777) | 0o200))
                .map_err(|e| filesystem_error(&target, e))?;
        }

        tracing::debug!(entry = %target.display(), "extracted");
        files += 1;
    }

    Ok(files)
}

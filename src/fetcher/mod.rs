//! Archive fetching
//!
//! This module handles:
//! - Resolving a project's archive URL from the registry and the URL template
//! - Following 301/302 redirects with an explicit hop limit
//! - Streaming the final response body to the temporary archive file
//!
//! The fetcher creates the archive file and hands its path to the installer,
//! which removes it after a successful extraction.

pub mod template;

use std::path::{Path, PathBuf};

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{
    Result, config_invalid, filesystem_error, http_status, missing_redirect_location,
    network_error, too_many_redirects,
};
use crate::registry::Registry;
use crate::ui::{self, ProgressReporter};

pub use template::UrlTemplate;

/// Extension of downloaded archives
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Default redirect hop limit
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Build the HTTP client shared by registry sync and archive downloads
///
/// Automatic redirects are off; [`ArchiveFetcher`] follows them itself.
pub fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::none())
        .build()
        .map_err(|e| config_invalid(format!("failed to initialise HTTP client: {e}")))
}

/// One archive download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Initial archive URL
    pub url: String,
    pub project: String,
    pub version: String,
    /// Directory the archive will be extracted into
    pub destination: PathBuf,
}

/// Downloads project archives
pub struct ArchiveFetcher<'a> {
    client: &'a Client,
    template: UrlTemplate,
    download_dir: PathBuf,
    max_redirects: usize,
}

impl<'a> ArchiveFetcher<'a> {
    pub fn new(client: &'a Client, template: UrlTemplate, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            template,
            download_dir: download_dir.into(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Resolve a project into a download task
    ///
    /// Fails with `ProjectNotFound` before any network activity when the
    /// project is not in the registry.
    pub fn task(&self, project: &str, registry: &Registry) -> Result<DownloadTask> {
        let record = registry.lookup(project)?;
        tracing::debug!(project, ?record, "resolved project");

        let destination = if record.origin.is_empty() {
            ui::warn(format!(
                "Project '{project}' has no Origin; installing into the current directory"
            ));
            PathBuf::from(".")
        } else {
            PathBuf::from(&record.origin)
        };

        Ok(DownloadTask {
            url: self.template.render(project, record),
            project: project.to_string(),
            version: record.version.clone(),
            destination,
        })
    }

    /// Where the archive for `task` is written
    ///
    /// Path separators in the project or version (e.g. `release/1.0`) become `_`
    /// so the archive always lands directly in the download directory.
    pub fn archive_path(&self, task: &DownloadTask) -> PathBuf {
        let stem = format!("{}-{}", task.project, task.version).replace(['/', '\\'], "_");
        self.download_dir.join(format!("{stem}.{ARCHIVE_EXTENSION}"))
    }

    /// Download the archive for `task` and return the path of the written file
    pub async fn fetch(
        &self,
        task: &DownloadTask,
        progress: &mut dyn ProgressReporter,
    ) -> Result<PathBuf> {
        let response = self.follow_redirects(task).await?;
        let path = self.archive_path(task);

        stream_to_file(response, &path, progress).await?;
        ui::success(format!("Downloaded {}", path.display()));
        Ok(path)
    }

    /// Request `task.url`, following redirects until a 200 response
    async fn follow_redirects(&self, task: &DownloadTask) -> Result<Response> {
        let mut url = Url::parse(&task.url)
            .map_err(|e| network_error(&task.url, format!("invalid URL: {e}")))?;
        let mut redirects = 0;

        loop {
            tracing::debug!(%url, redirects, "requesting archive");
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| network_error(url.as_str(), e.to_string()))?;

            match response.status() {
                StatusCode::OK => return Ok(response),
                StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
                    if redirects >= self.max_redirects {
                        return Err(too_many_redirects(&task.url, self.max_redirects));
                    }
                    url = redirect_target(&url, &response)?;
                    redirects += 1;
                    ui::info(format!("Redirected to: {url}"));
                }
                other => return Err(http_status(url.as_str(), other.as_u16())),
            }
        }
    }
}

/// Resolve the `Location` of a redirect against the URL that produced it
fn redirect_target(current: &Url, response: &Response) -> Result<Url> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|location| current.join(location).ok())
        .ok_or_else(|| missing_redirect_location(current.as_str(), response.status().as_u16()))
}

/// Write the response body to `path` chunk by chunk
///
/// A partially written file is removed when the transfer fails.
async fn stream_to_file(
    mut response: Response,
    path: &Path,
    progress: &mut dyn ProgressReporter,
) -> Result<()> {
    let url = response.url().to_string();
    let mut file = File::create(path)
        .await
        .map_err(|e| filesystem_error(path, e))?;

    let label = path
        .file_name()
        .map_or_else(|| url.clone(), |name| name.to_string_lossy().into_owned());
    progress.start(&label, response.content_length());

    let written: Result<()> = async {
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| network_error(&url, e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| filesystem_error(path, e))?;
            progress.advance(chunk.len() as u64);
        }
        file.flush().await.map_err(|e| filesystem_error(path, e))?;
        file.sync_all().await.map_err(|e| filesystem_error(path, e))
    }
    .await;
    drop(file);

    match written {
        Ok(()) => {
            progress.finish();
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            if let Err(remove_err) = tokio::fs::remove_file(path).await {
                tracing::warn!(
                    "failed to remove partial download {}: {remove_err}",
                    path.display()
                );
            }
            Err(e)
        }
    }
}

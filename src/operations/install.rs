//! Install operation
//!
//! Drives one run of the pipeline:
//! 1. Load the local registry
//! 2. Reconcile it with the remote copy (unless disabled)
//! 3. Look up the requested project
//! 4. Download its archive
//! 5. Extract the archive and remove it

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use reqwest::Client;

use crate::error::{EzpkgmError, Result};
use crate::fetcher::{ArchiveFetcher, build_client};
use crate::installer;
use crate::registry::{JsonFileStore, Registry, RegistryStore, SyncEngine};
use crate::settings::Settings;
use crate::ui::{
    self, BarProgressReporter, ProgressReporter, SilentProgressReporter, prompt::ConfirmPrompt,
};

/// Notice printed when no project name is given
pub const USAGE_NOTICE: &str = "Please provide a project name to install.";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed {
        project: String,
        destination: PathBuf,
    },
    /// The project is not in the registry
    NotFound,
    /// No project name was given
    NoProject,
}

/// Run the pipeline, drawing a progress bar when stderr is a terminal
pub async fn run(
    settings: &Settings,
    prompt: &dyn ConfirmPrompt,
    project: Option<&str>,
) -> Result<InstallOutcome> {
    let mut progress: Box<dyn ProgressReporter> = if io::stderr().is_terminal() {
        Box::new(BarProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter::default())
    };
    run_with_progress(settings, prompt, project, progress.as_mut()).await
}

/// Run the pipeline, reporting download progress to `progress`
pub async fn run_with_progress(
    settings: &Settings,
    prompt: &dyn ConfirmPrompt,
    project: Option<&str>,
    progress: &mut dyn ProgressReporter,
) -> Result<InstallOutcome> {
    let client = build_client(&settings.user_agent)?;
    let store = JsonFileStore::new(&settings.registry_path);

    let registry = load_registry(settings, &client, &store, prompt).await;

    let Some(project) = project else {
        ui::info(USAGE_NOTICE);
        return Ok(InstallOutcome::NoProject);
    };

    let fetcher = ArchiveFetcher::new(&client, settings.url_template.clone(), &settings.download_dir)
        .with_max_redirects(settings.max_redirects);

    let task = match fetcher.task(project, &registry) {
        Ok(task) => task,
        Err(e @ EzpkgmError::ProjectNotFound { .. }) => {
            ui::warn(&e);
            return Ok(InstallOutcome::NotFound);
        }
        Err(e) => return Err(e),
    };

    ui::info(format!(
        "Installing {project} {} into {}",
        task.version,
        task.destination.display()
    ));
    let archive = fetcher.fetch(&task, progress).await?;
    let report = installer::install(&archive, &task.destination).await?;

    ui::success(format!(
        "Installed {project} {} into {} ({} file(s))",
        task.version,
        report.destination.display(),
        report.files
    ));
    Ok(InstallOutcome::Installed {
        project: project.to_string(),
        destination: report.destination,
    })
}

async fn load_registry(
    settings: &Settings,
    client: &Client,
    store: &JsonFileStore,
    prompt: &dyn ConfirmPrompt,
) -> Registry {
    let local = store.load();
    if local.is_empty() {
        tracing::debug!(path = %store.path().display(), "local registry has no projects");
    }
    if !settings.sync {
        tracing::debug!("registry sync disabled");
        return local;
    }
    SyncEngine::new(client, &settings.remote_url, store, prompt)
        .reconcile(local)
        .await
}

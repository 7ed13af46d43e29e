//! ezpkgm - tagged source archive installer
//!
//! Looks a project up in a local JSON registry, optionally reconciles that
//! registry with a canonical remote copy, downloads the project's tagged source
//! archive and extracts it into the project's destination directory.

use clap::Parser;

mod cli;
mod error;
mod fetcher;
mod installer;
mod logging;
mod operations;
mod registry;
mod settings;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;
use error::EzpkgmError;
use operations::InstallOutcome;
use settings::Settings;

/// Exit status for a failure
fn exit_code(err: &EzpkgmError) -> i32 {
    match err {
        EzpkgmError::ConfigInvalid { .. } => 2,
        _ => 1,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            ui::error(&e);
            std::process::exit(exit_code(&e));
        }
    };
    tracing::debug!(?settings, "resolved settings");

    let prompt = ui::prompt::for_terminal(settings.assume_yes);
    let result = operations::install::run(&settings, prompt.as_ref(), cli.project.as_deref()).await;

    match result {
        Ok(InstallOutcome::Installed {
            project,
            destination,
        }) => tracing::debug!(%project, destination = %destination.display(), "install finished"),
        Ok(outcome) => tracing::debug!(?outcome, "nothing installed"),
        Err(e) => {
            ui::error(&e);
            std::process::exit(exit_code(&e));
        }
    }
}

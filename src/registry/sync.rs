//! Registry reconciliation against the canonical remote copy
//!
//! The comparison is whole-document: when the remote registry differs in any
//! way the user is asked once, and an affirmative answer replaces the local
//! registry entirely. Projects that only exist locally do not survive an
//! overwrite; the diff printed before the question names them.

use reqwest::{Client, StatusCode};

use super::{Registry, RegistryDiff, RegistryStore};
use crate::error::{Result, remote_fetch_failed};
use crate::ui::{self, display, prompt::ConfirmPrompt};

/// Question asked before a destructive overwrite
pub const OVERWRITE_QUESTION: &str = "Overwrite the local registry with the remote copy?";

/// Reconciles the local registry with a remote one
pub struct SyncEngine<'a> {
    client: &'a Client,
    remote_url: &'a str,
    store: &'a dyn RegistryStore,
    prompt: &'a dyn ConfirmPrompt,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        client: &'a Client,
        remote_url: &'a str,
        store: &'a dyn RegistryStore,
        prompt: &'a dyn ConfirmPrompt,
    ) -> Self {
        Self {
            client,
            remote_url,
            store,
            prompt,
        }
    }

    /// Download and parse the remote registry
    pub async fn fetch_remote(&self) -> Result<Registry> {
        let url = self.remote_url;
        tracing::debug!(%url, "fetching remote registry");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| remote_fetch_failed(url, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(remote_fetch_failed(
                url,
                format!("HTTP status {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| remote_fetch_failed(url, e.to_string()))?;

        Registry::from_json(&body).map_err(|e| {
            tracing::debug!(%body, "received unparseable registry");
            remote_fetch_failed(url, format!("invalid registry document: {e}"))
        })
    }

    /// Return the registry to use for the rest of the run
    ///
    /// Failures are reported and leave `local` in effect.
    pub async fn reconcile(&self, local: Registry) -> Registry {
        ui::info("Checking for registry updates...");

        let remote = match self.fetch_remote().await {
            Ok(remote) => remote,
            Err(e) => {
                ui::error(&e);
                return local;
            }
        };

        if remote == local {
            ui::info("Registry is up to date.");
            return local;
        }

        display::display_registry_diff(&RegistryDiff::between(&local, &remote));

        match self.prompt.confirm(OVERWRITE_QUESTION) {
            Some(true) => match self.store.save(&remote) {
                Ok(()) => {
                    ui::success(format!(
                        "Registry updated ({} project(s))",
                        remote.len()
                    ));
                    remote
                }
                Err(e) => {
                    ui::error(&e);
                    local
                }
            },
            Some(false) => {
                ui::info("Registry update skipped.");
                local
            }
            None => {
                ui::warn("No answer received; registry update skipped");
                local
            }
        }
    }
}

//! Operations module
//!
//! High-level workflows coordinating the registry, the fetcher, the installer
//! and the UI. Each operation receives its resolved [`crate::settings::Settings`]
//! explicitly.

pub mod install;

pub use install::InstallOutcome;

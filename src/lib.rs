//! Chartflow — clinical-intake forms and report generation.
//!
//! Nurses and doctors fill out structured patient forms that move through
//! a nurse-pending → doctor-pending → completed workflow; a deterministic
//! compositor lays the collected data out as a fixed eight-page PDF
//! report. The crate is a library: an embedding shell (desktop app, web
//! backend) owns navigation, authentication and presentation, and calls in
//! here for the workflow rules, persistence and report synthesis.

pub mod config;
pub mod db;
pub mod measurements;
pub mod models;
pub mod report;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding shell. Honors RUST_LOG, falling
/// back to the crate-level default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

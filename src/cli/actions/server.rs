use crate::{
    api::{self, Store},
    cli::telemetry,
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<SecretString>,
    pub frontend_origin: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store = match &args.dsn {
        Some(dsn) => Store::connect(dsn.expose_secret())
            .await
            .context("Failed to open PostgreSQL store")?,
        None => {
            warn!("No DSN given, users are kept in memory");
            Store::memory()
        }
    };
    info!("Using {} store", store.kind());

    let result = api::new(args.port, store, &args.frontend_origin).await;

    telemetry::shutdown_tracer();

    result
}

//! Registration CLI - Main entry point.

use anyhow::Context;
use identity_client::{IdentityClient, ProfileDatabaseClient};
use register_cli::{
    AppResult, Config, RouteNavigator, Session, SessionEnd, Terminal, TerminalNotifier,
};
use registration::{FormHandle, SubmissionController};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level, config.log.json);

    info!("Starting registration CLI");

    // Initialize clients
    let auth = Arc::new(IdentityClient::new(
        &config.identity.api_key,
        &config.identity.auth_url,
        config.identity.timeout,
    )?);
    let profiles = Arc::new(ProfileDatabaseClient::new(
        &config.identity.database_url,
        config.identity.timeout,
    )?);

    info!(
        auth_url = %config.identity.auth_url,
        database_url = %config.identity.database_url,
        "Identity services configured"
    );

    let terminal = Terminal::stdout();
    let (navigator, route) = RouteNavigator::new(terminal.clone());

    let controller = Arc::new(
        SubmissionController::new(
            auth,
            profiles,
            Arc::new(TerminalNotifier::new(terminal.clone())),
            Arc::new(navigator),
        )
        .with_settings(config.form.controller_settings()),
    );

    let form = FormHandle::mount();
    let mut session = Session::new(
        form.clone(),
        controller,
        BufReader::new(tokio::io::stdin()),
        terminal,
    );

    let end = tokio::select! {
        end = session.run() => end?,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            form.unmount();
            return Ok(());
        }
    };

    match end {
        SessionEnd::Registered(redirect) => {
            tokio::select! {
                navigated = redirect.wait() => {
                    match route.borrow().as_deref() {
                        Some(path) if navigated => info!(path, "Registration complete"),
                        _ => warn!("Redirect cancelled"),
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    form.unmount();
                }
            }
        }
        SessionEnd::Aborted => {
            info!("Registration aborted");
            form.unmount();
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so prompts on stdout stay readable.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

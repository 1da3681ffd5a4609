//! carhire - command-line client for the car rental backend
//!
//! Each invocation loads the stored session, runs one screen against the
//! backend and prints the result. Exit code 2 means the route guard sent the
//! user elsewhere; 1 is any other failure.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod render;
mod state;
#[cfg(test)]
mod testing;
mod viewmodel;

use carhire_core::{Config, Route};
use viewmodel::ScreenError;

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr so stdout stays clean for listings
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (runtime, mut app_state) = match start(&cli) {
        Ok(started) => started,
        Err(e) => {
            tracing::error!("Failed to initialize application: {:#}", e);
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    match runtime.block_on(commands::run(&mut app_state, cli.command)) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", describe(&err));
            std::process::exit(err.exit_code());
        }
    }
}

fn start(cli: &cli::Cli) -> anyhow::Result<(tokio::runtime::Runtime, state::AppState)> {
    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_env();
    tracing::debug!(base_url = config.base_url(), "Configuration loaded");

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let app_state = state::AppState::new(config).context("Failed to open session store")?;
    Ok((runtime, app_state))
}

fn describe(err: &ScreenError) -> String {
    match err {
        ScreenError::Redirect(Route::Login) => "Please log in first (carhire login)".to_string(),
        ScreenError::Redirect(Route::Unauthorized) => {
            "You are not authorized to view this page".to_string()
        }
        ScreenError::Redirect(route) => format!("Redirected to {}", route),
        ScreenError::Validation(errors) => render::field_errors(errors),
        ScreenError::Banner(message) => message.clone(),
    }
}

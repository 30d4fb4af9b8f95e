//! TaskApp Frontend Entry Point

mod app;
mod components;
mod context;
mod logging;
mod presentation;
mod store;

use app::App;
use leptos::prelude::*;
use todo_sync::{ClientConfig, CognitoIdentity, SyncResult};

/// Endpoint and user-pool settings, fixed at build time
const AWS_EXPORTS: &str = include_str!("../config/aws-exports.json");

fn bootstrap() -> SyncResult<(ClientConfig, CognitoIdentity)> {
    let config = ClientConfig::from_json(AWS_EXPORTS)?;
    let identity = CognitoIdentity::new(&config)?;
    Ok((config, identity))
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    match bootstrap() {
        Ok((config, identity)) => {
            tracing::info!(endpoint = %config.graphql_endpoint, mode = ?config.auth_mode, "starting");
            mount_to_body(move || view! { <App config=config identity=identity /> });
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            let message = e.to_string();
            mount_to_body(move || view! { <p class="config-error">{message}</p> });
        }
    }
}

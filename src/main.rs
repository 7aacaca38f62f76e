// rpc-form - main.rs
// Loads configuration, installs logging, then hands off to the CLI dispatcher.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use rpc_form::cli::{dispatch, Cli};
use rpc_form::client::RpcClient;
use rpc_form::config::load_config;
use rpc_form::form::FormSession;
use rpc_form::request_id::RequestIdGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
        config.validate().context("validating --endpoint")?;
    }

    // Logs go to stderr so stdout carries only the result text.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .init();

    let client = RpcClient::new(&config)?;
    tracing::debug!(endpoint = %client.endpoint(), "client ready");
    let session = FormSession::new(client, RequestIdGenerator::new());

    Ok(dispatch(cli, &config, &session).await?)
}

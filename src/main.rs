use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use nba_games::{
    http::{server::run_http_server, server_environment::ServerEnvironment},
    utils::log::bootstrap_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    // NB: The .env file is optional, the variables may come from the process environment.
    dotenv().ok();
    bootstrap_logging();
    run_http_server(Arc::new(ServerEnvironment::current()?)).await
}

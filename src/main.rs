// Entrypoint for the CLI application.
// - Keeps `main` small: read config, start logging, build the API client
//   and hand everything to the menu navigator.

use anyhow::Context as _;
use prodman_cli::handlers::Context;
use prodman_cli::logging::init_logging;
use prodman_cli::ui::Terminal;
use prodman_cli::{ApiClient, Config, Navigator};

fn main() -> anyhow::Result<()> {
    // Base URL comes from `PRODUCT_API_URL` or defaults to
    // http://localhost:8080. See `config::Config::from_env`.
    let config = Config::from_env();
    init_logging(&config)?;
    tracing::info!(base_url = %config.base_url, "starting");

    let api = ApiClient::from_config(&config)?;

    // Blocks until the user picks "Exit" from the welcome menu.
    let mut navigator = Navigator::new(Context::new(api, Terminal::new()));
    navigator.run().context("Interactive session ended unexpectedly")?;

    tracing::info!("exiting");
    Ok(())
}

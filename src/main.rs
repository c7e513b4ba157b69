use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use skyboard_auth::{
    CredentialSource, RefreshConfig, RefreshingCredentialSource, StaticCredential, TokenStore,
};
use skyboard_core::{AppError, Config};
use skyboard_ui::DashboardController;
use skyboard_weather::{WeatherClient, WeatherFetcher};

/// Slack on top of the request timeout for credential acquisition.
const SETTLE_MARGIN: Duration = Duration::from_secs(15);

fn main() -> Result<()> {
    // Initialize core
    skyboard_core::init()?;

    let (config, _validation) = Config::load_validated().map_err(|e| {
        let err = AppError::from(e);
        tracing::error!(kind = err.kind(), "{}", err.user_message());
        err
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("skyboard-tokio")
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    match config.auth.effective_access_token() {
        Some(token) => run(&config, &runtime, StaticCredential::new(token)),
        None => {
            let source = RefreshingCredentialSource::new(
                RefreshConfig {
                    token_url: config.auth.token_url.clone(),
                    client_id: config.auth.client_id.clone(),
                },
                TokenStore::new(&config.config_dir),
            );
            run(&config, &runtime, source)
        }
    }
}

/// Drive one dashboard session to its first settled state and print the view.
fn run<C: CredentialSource + 'static>(
    config: &Config,
    runtime: &tokio::runtime::Runtime,
    credentials: C,
) -> Result<()> {
    let timeout = Duration::from_secs(config.api.request_timeout_secs);
    let client = WeatherClient::new(&config.api.base_url, timeout)
        .context("Failed to build weather client")?;
    tracing::info!(base_url = client.base_url(), "Skyboard started");
    let fetcher = Arc::new(WeatherFetcher::new(Arc::new(credentials), client));

    let mut controller =
        DashboardController::new(fetcher, runtime.handle().clone(), config.api.audience.clone());
    controller.set_search_placeholder(config.ui.search_placeholder.clone());

    if !controller.wait_for_fetch(timeout + SETTLE_MARGIN) {
        tracing::warn!("Weather fetch did not settle in time");
    }

    let view = controller.view();
    println!(
        "{}",
        serde_json::to_string_pretty(&view).context("Failed to serialise dashboard view")?
    );

    Ok(())
}

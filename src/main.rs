use anyhow::Result;
use tracing::{info, warn};

use moving_quote::{app, config::Config, init_tracing, mailer, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set directly
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    let mailer = mailer::from_config(&config.mail)?;

    if mailer.is_live() {
        info!("Quote notifications go to {}", config.mail.business_address);
    } else {
        warn!("RESEND_API_KEY not set, running in demo mode (no emails sent)");
    }

    let addr = config.bind_addr;
    let state = AppState::new(config, mailer);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting moving quote service on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}

use std::sync::Arc;

use gatebot_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), gatebot_core::Error> {
    gatebot_core::logging::init("gatebot")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "refusing to start");
            return Err(e);
        }
    };
    tracing::info!(channel = %cfg.channel.chat_handle(), "configuration loaded");

    gatebot_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| gatebot_core::Error::External(format!("telegram bot failed: {e}")))?;

    tracing::info!("bye");
    Ok(())
}

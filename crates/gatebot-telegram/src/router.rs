use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use gatebot_core::{config::Config, workflow::GateWorkflow};

use crate::handlers;
use crate::TelegramClient;

/// Shared, read-only handler dependencies.
#[derive(Clone)]
pub struct AppState {
    pub workflow: GateWorkflow,
}

impl AppState {
    pub fn new(cfg: &Config, client: Arc<TelegramClient>) -> Self {
        Self {
            workflow: GateWorkflow::new(client.clone(), client, cfg.channel.clone()),
        }
    }
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    match bot.get_me().await {
        Ok(me) => tracing::info!(bot = %me.username(), "bot started, polling"),
        Err(e) => tracing::warn!(error = %e, "getMe failed; continuing"),
    }
    tracing::info!(
        channel = %cfg.channel.chat_handle(),
        "make sure the bot is a member or admin of the gate channel"
    );

    let client = Arc::new(TelegramClient::new(bot.clone()));
    let state = Arc::new(AppState::new(&cfg, client));

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            tracing::debug!(update = ?upd.kind, "unhandled update");
        })
        .build();

    // Stop polling on SIGINT/SIGTERM and let in-flight handlers finish.
    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        shutdown_signal().await;
        match token.shutdown() {
            Ok(done) => {
                done.await;
                tracing::info!("dispatcher stopped");
            }
            Err(e) => tracing::warn!(error = ?e, "dispatcher was not running"),
        }
    });

    dispatcher.dispatch().await;
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(?error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(error) => {
                tracing::warn!(?error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

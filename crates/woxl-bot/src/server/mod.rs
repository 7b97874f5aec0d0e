//! Bot runtime
//!
//! Builds the state, publishes the command menu and runs the poll loop.
//! Each update is handled in its own task; shutdown cancels the poller,
//! drains in-flight tasks and closes the pool.

mod state;

pub use state::BotState;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use woxl_common::{AppConfig, AppError};
use woxl_db::{
    create_pool, run_migrations, PgChatRepository, PgNickRepository, PgPool,
    PgRoleAssignmentRepository, PgWarnRepository, PoolConfig,
};
use woxl_service::ServiceContextBuilder;

use crate::handlers::on_bot_membership;
use crate::protocol::{BotMembership, IncomingCallback, IncomingMessage, Outbound};
use crate::telegram::types::{BotCommand, Update};
use crate::telegram::{poll_loop, TelegramApi};

/// Updates buffered between the poller and the dispatch loop
const UPDATE_BUFFER: usize = 64;

/// Connect to the database and create BotState
pub async fn create_bot_state(config: AppConfig) -> Result<(BotState, PgPool), AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("schema bootstrap failed: {e}")))?;
    info!("PostgreSQL connection established");

    let api = TelegramApi::with_base_url(
        &config.bot.token,
        &config.bot.api_url,
        config.bot.poll_timeout_secs,
    )
    .map_err(|e| AppError::Config(e.to_string()))?;

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .chat_repo(Arc::new(PgChatRepository::new(pool.clone())))
        .role_repo(Arc::new(PgRoleAssignmentRepository::new(pool.clone())))
        .nick_repo(Arc::new(PgNickRepository::new(pool.clone())))
        .warn_repo(Arc::new(PgWarnRepository::new(pool.clone())))
        .warns_page_size(config.pagination.warns_page_size)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok((BotState::new(service_context, api, config), pool))
}

/// Menu shown by Telegram clients next to the input field
fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Запустить бота"),
        BotCommand::new("admins", "Показать список админов"),
    ]
}

/// Run the bot until Ctrl-C
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let (state, pool) = create_bot_state(config).await?;

    if let Err(e) = state.api().set_my_commands(&bot_commands()).await {
        warn!(error = %e, "Could not publish command menu");
    }

    let (update_tx, mut update_rx) = mpsc::channel(UPDATE_BUFFER);
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let poller = tokio::spawn(poll_loop(
        Arc::clone(state.api()),
        state.config().bot.poll_timeout_secs,
        update_tx,
        cancel_rx,
    ));

    info!("Woxl bot is running");
    let mut tasks = JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            update = update_rx.recv() => match update {
                Some(update) => {
                    let state = state.clone();
                    tasks.spawn(async move { process_update(&state, update).await });
                }
                None => {
                    warn!("Poller stopped unexpectedly");
                    break;
                }
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    error!(error = %e, "Update task panicked");
                }
            }
        }
    }

    // Stop polling, then let in-flight updates finish
    let _ = cancel_tx.send(true);
    if let Err(e) = poller.await {
        error!(error = %e, "Poller task failed");
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Update task panicked");
        }
    }

    pool.close().await;
    info!("Woxl bot stopped");
    Ok(())
}

/// Handle one update and deliver the reply, if any
pub async fn process_update(state: &BotState, update: Update) {
    let dispatcher = state.dispatcher();
    let api = state.api();

    if let Some(message) = update.message.as_ref() {
        if let Some(incoming) = IncomingMessage::from_telegram(message) {
            if let Some(reply) = dispatcher.on_message(&incoming).await {
                deliver(api, reply).await;
            }
        }
    }

    if let Some(query) = update.callback_query.as_ref() {
        let Some(incoming) = IncomingCallback::from_telegram(query) else {
            // Still ack to remove the spinner
            let _ = api.answer_callback_query(&query.id, None).await;
            return;
        };

        let outcome = dispatcher.on_callback(&incoming).await;
        if let Err(e) = api
            .answer_callback_query(&incoming.id, outcome.notice.as_deref())
            .await
        {
            debug!(error = %e, "answerCallbackQuery failed");
        }
        if let Some(edit) = outcome.edit {
            deliver(api, edit).await;
        }
    }

    if let Some(change) = update.my_chat_member.as_ref() {
        let membership = BotMembership::from_telegram(change);
        on_bot_membership(state.service_context(), &**api, &membership).await;
    }
}

/// Send or edit a message, logging failures
async fn deliver(api: &TelegramApi, outbound: Outbound) {
    let result = match &outbound {
        Outbound::Send {
            chat_id,
            reply_to,
            text,
            keyboard,
        } => api
            .send_message(chat_id.into_inner(), text, *reply_to, keyboard.as_ref())
            .await
            .map(|_| ()),
        Outbound::Edit {
            chat_id,
            message_id,
            text,
            keyboard,
        } => api
            .edit_message_text(chat_id.into_inner(), *message_id, text, keyboard.as_ref())
            .await,
    };

    match result {
        Ok(()) => {}
        // Pressing the button of the page already shown
        Err(e) if e.is_not_modified() => debug!("Message already up to date"),
        Err(e) => error!(error = %e, "Failed to deliver reply"),
    }
}

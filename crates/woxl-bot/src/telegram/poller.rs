//! Long-polling loop for Telegram Bot API `getUpdates`.
//!
//! The poller owns the update offset and forwards every update it receives
//! through a channel; it never interprets them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::api::TelegramApi;
use super::types::Update;

const MAX_BACKOFF_SECS: u64 = 60;

/// Run the long-polling loop until `cancel` flips to `true`.
///
/// Failed `getUpdates` calls back off exponentially from 1s up to 60s. The
/// loop also stops when the receiving side of `update_tx` is dropped.
pub async fn poll_loop(
    api: Arc<TelegramApi>,
    poll_timeout: u64,
    update_tx: mpsc::Sender<Update>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut offset: Option<i64> = None;
    let mut backoff_secs = 1u64;

    info!(poll_timeout, "Telegram poller started");

    loop {
        if *cancel.borrow() {
            info!("Telegram poller shutting down");
            return;
        }

        let updates = tokio::select! {
            result = api.get_updates(offset, poll_timeout) => result,
            _ = cancel.changed() => {
                info!("Telegram poller cancelled");
                return;
            }
        };

        match updates {
            Ok(updates) => {
                backoff_secs = 1;

                for update in updates {
                    // Acknowledge before handing off; a failed handler is not retried
                    offset = Some(next_offset(offset, update.update_id));
                    debug!(update_id = update.update_id, "update received");

                    if update_tx.send(update).await.is_err() {
                        warn!("update channel closed, stopping poller");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, backoff_secs, "getUpdates failed, backing off");
                tokio::select! {
                    () = tokio::time::sleep(Duration::from_secs(backoff_secs)) => {}
                    _ = cancel.changed() => {
                        info!("Telegram poller cancelled during backoff");
                        return;
                    }
                }
                backoff_secs = next_backoff(backoff_secs);
            }
        }
    }
}

/// Offset that acknowledges `update_id`; never moves backwards
fn next_offset(current: Option<i64>, update_id: i64) -> i64 {
    current.map_or(update_id + 1, |off| off.max(update_id + 1))
}

fn next_backoff(secs: u64) -> u64 {
    (secs * 2).min(MAX_BACKOFF_SECS)
}

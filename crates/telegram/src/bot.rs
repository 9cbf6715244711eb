use std::time::Duration;

use {
    secrecy::ExposeSecret,
    teloxide::{
        ApiError, RequestError,
        prelude::*,
        types::{AllowedUpdate, UpdateKind},
    },
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
};

use crate::{
    config::TelegramConfig,
    error::{Error, Result},
    fetch::{AttachmentFetcher, TelegramFetcher},
    handlers,
    outbound::{ReplySink, TelegramOutbound},
};

/// Sleep before polling again after a transient `getUpdates` failure.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-poll the Bot API and handle updates until the token is cancelled.
///
/// Messages are drained in arrival order, one at a time; a failing message
/// is logged and dropped without affecting the ones behind it. Returns an
/// error only for fatal conditions: startup failures and a conflicting
/// poller on the same token.
pub async fn run(config: TelegramConfig, cancel: CancellationToken) -> Result<()> {
    // Client timeout above the long-poll window so the HTTP client doesn't
    // abort the request before Telegram responds.
    let client = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(u64::from(config.poll_timeout_secs) + 15))
        .build()?;
    let bot = Bot::with_client(config.token.expose_secret(), client);

    // Verify credentials and clear any webhook so long polling works.
    let me = bot.get_me().await?;
    bot.delete_webhook().send().await?;
    info!(username = ?me.username, "telegram bot connected (webhook cleared)");

    let fetcher = TelegramFetcher::new(bot.clone(), Duration::from_secs(config.fetch_timeout_secs));
    let outbound = TelegramOutbound::new(bot.clone());

    poll_updates(&bot, &config, &fetcher, &outbound, &cancel).await
}

async fn poll_updates(
    bot: &Bot,
    config: &TelegramConfig,
    fetcher: &dyn AttachmentFetcher,
    sink: &dyn ReplySink,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut offset: i32 = 0;

    loop {
        let result = tokio::select! {
            () = cancel.cancelled() => {
                info!("telegram polling stopped");
                return Ok(());
            },
            result = bot
                .get_updates()
                .offset(offset)
                .timeout(config.poll_timeout_secs)
                .allowed_updates(vec![AllowedUpdate::Message])
                .send() => result,
        };

        match result {
            Ok(updates) => {
                debug!(count = updates.len(), "got telegram updates");
                for update in updates {
                    offset = update.id.as_offset();
                    match update.kind {
                        UpdateKind::Message(msg) => {
                            if let Err(e) = handlers::handle_message(&msg, fetcher, sink).await {
                                // Per-message failure: drop it, keep the
                                // stream alive.
                                error!(
                                    chat_id = msg.chat.id.0,
                                    error = %e,
                                    "error handling telegram message"
                                );
                            }
                        },
                        other => {
                            debug!("ignoring non-message update: {other:?}");
                        },
                    }
                }
            },
            Err(e) => {
                // Another poller on the same token is fatal for this process.
                if matches!(&e, RequestError::Api(ApiError::TerminatedByOtherGetUpdates)) {
                    error!("another bot instance is already polling with this token");
                    return Err(Error::Telegram(e));
                }
                warn!(error = %e, "telegram getUpdates failed");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
            },
        }
    }
}

use {
    async_trait::async_trait,
    teloxide::{
        payloads::SendPhotoSetters,
        prelude::*,
        types::{ChatId, InputFile},
    },
    tracing::info,
};

use crate::error::{Error, Result};

/// Declared filename for the in-memory photo upload.
const SWATCH_FILENAME: &str = "swatch.jpg";

/// Preview bytes plus hex caption, addressed to one chat.
#[derive(Debug, Clone)]
pub struct OutboundReply {
    pub photo: Vec<u8>,
    pub caption: String,
}

/// Delivers replies to the originating user.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, chat_id: ChatId, reply: OutboundReply) -> Result<()>;
}

/// Outbound sender backed by the Bot API.
pub struct TelegramOutbound {
    bot: Bot,
}

impl TelegramOutbound {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramOutbound {
    async fn send(&self, chat_id: ChatId, reply: OutboundReply) -> Result<()> {
        let bytes = reply.photo.len();
        let caption_len = reply.caption.len();
        let input = InputFile::memory(reply.photo).file_name(SWATCH_FILENAME);
        self.bot
            .send_photo(chat_id, input)
            .caption(reply.caption)
            .await
            .map_err(|source| Error::Send { source })?;
        info!(chat_id = chat_id.0, bytes, caption_len, "sent swatch reply");
        Ok(())
    }
}

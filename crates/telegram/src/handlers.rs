use {
    teloxide::types::{ChatId, MediaKind, Message, MessageKind},
    tracing::debug,
};

use swatchbot_media::{DecodeOutcome, average_color, decode, render_preview};

use crate::{
    error::Result,
    fetch::AttachmentFetcher,
    outbound::{OutboundReply, ReplySink},
};

/// Reference to an image supplied with an inbound message. Lives only for
/// the duration of one message-handling operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundAttachment {
    /// Opaque Bot API file id, resolved to bytes by the fetcher.
    pub file_id: String,
    /// Originating user, which is where the reply goes.
    pub chat_id: ChatId,
}

/// Pick the primary attachment from a message: the first photo variant
/// (smallest resolution) or the attached document.
#[must_use]
pub fn extract_attachment(msg: &Message) -> Option<InboundAttachment> {
    let user = msg.from.as_ref()?;
    let file_id = match &msg.kind {
        MessageKind::Common(common) => match &common.media_kind {
            MediaKind::Photo(photo) => photo.photo.first().map(|ps| ps.file.id.clone()),
            MediaKind::Document(doc) => Some(doc.document.file.id.clone()),
            _ => None,
        },
        _ => None,
    }?;
    Some(InboundAttachment {
        file_id,
        chat_id: ChatId(user.id.0 as i64),
    })
}

/// Handle one inbound message end to end.
///
/// Messages without a photo or document attachment produce no output and no
/// error. Any failure past that point aborts this one message only.
pub async fn handle_message(
    msg: &Message,
    fetcher: &dyn AttachmentFetcher,
    sink: &dyn ReplySink,
) -> Result<()> {
    let Some(attachment) = extract_attachment(msg) else {
        debug!(chat_id = msg.chat.id.0, "ignoring message without image attachment");
        return Ok(());
    };

    debug!(
        chat_id = attachment.chat_id.0,
        file_id = %attachment.file_id,
        "handling image message"
    );
    let bytes = fetcher.fetch(&attachment.file_id).await?;
    let reply = swatch_reply(&bytes)?;
    sink.send(attachment.chat_id, reply).await
}

/// Run the pipeline over raw image bytes: decode, average, render the
/// swatch captioned with the hex code.
pub fn swatch_reply(bytes: &[u8]) -> Result<OutboundReply> {
    let raster = match decode(bytes)? {
        DecodeOutcome::Decoded(raster) => raster,
        DecodeOutcome::UnsupportedFormat => {
            return Err(swatchbot_media::Error::UnsupportedFormat.into());
        },
    };
    let sample = average_color(&raster)?;
    let photo = render_preview(sample)?;
    Ok(OutboundReply {
        photo,
        caption: sample.hex(),
    })
}

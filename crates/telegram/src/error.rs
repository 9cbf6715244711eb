use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid startup configuration. Fatal.
    #[error("{message}")]
    Config { message: String },

    /// The Bot API rejected a request.
    #[error(transparent)]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client failure outside a download (e.g. client construction).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Resolving a file id via the Bot API failed.
    #[error("resolving attachment: {source}")]
    Resolve {
        #[source]
        source: teloxide::RequestError,
    },

    /// Attachment download failed: non-success status or interrupted
    /// transfer.
    #[error("downloading attachment: {message}")]
    Download { message: String },

    /// Image pipeline failure for this message.
    #[error(transparent)]
    Media(#[from] swatchbot_media::Error),

    /// The Bot API rejected the outbound reply.
    #[error("sending reply: {source}")]
    Send {
        #[source]
        source: teloxide::RequestError,
    },
}

impl Error {
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No supported format signature matched the input bytes.
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// The bytes matched a supported signature but did not decode.
    #[error("decoding image: {0}")]
    Decode(#[source] image::ImageError),

    /// The raster violates a pipeline precondition (e.g. zero pixels).
    #[error("invalid image: {message}")]
    InvalidImage { message: String },

    /// The preview codec rejected the raster.
    #[error("encoding preview: {0}")]
    Encoding(#[source] image::ImageError),
}

impl Error {
    #[must_use]
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use {
    image::{DynamicImage, ImageFormat},
    tracing::debug,
};

use crate::error::{Error, Result};

/// Formats the registry accepts. Mirrors the codec features compiled into
/// the `image` dependency.
pub const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// Outcome of running bytes through the decoder registry.
#[derive(Debug)]
pub enum DecodeOutcome {
    /// The bytes carried a supported signature and decoded cleanly.
    Decoded(DynamicImage),
    /// No supported format signature matched.
    UnsupportedFormat,
}

/// Detect the image format from the leading magic bytes.
#[must_use]
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    let format = image::guess_format(data).ok()?;
    SUPPORTED_FORMATS.contains(&format).then_some(format)
}

/// Decode image bytes, dispatching on the sniffed format.
///
/// An unrecognized signature yields [`DecodeOutcome::UnsupportedFormat`];
/// recognized but corrupt data is an [`Error::Decode`].
pub fn decode(data: &[u8]) -> Result<DecodeOutcome> {
    let Some(format) = sniff_format(data) else {
        return Ok(DecodeOutcome::UnsupportedFormat);
    };
    debug!(?format, bytes = data.len(), "decoding image");
    let raster = image::load_from_memory_with_format(data, format).map_err(Error::Decode)?;
    Ok(DecodeOutcome::Decoded(raster))
}

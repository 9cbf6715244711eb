use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::{
    color::ColorSample,
    error::{Error, Result},
};

/// Preview swatch dimensions.
pub const PREVIEW_WIDTH: u32 = 500;
pub const PREVIEW_HEIGHT: u32 = 500;

/// Render a solid-color swatch for the sample and encode it as JPEG at the
/// encoder's default quality.
pub fn render_preview(sample: ColorSample) -> Result<Vec<u8>> {
    let fill = Rgb([sample.red, sample.green, sample.blue]);
    let raster = RgbImage::from_pixel(PREVIEW_WIDTH, PREVIEW_HEIGHT, fill);

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(raster)
        .write_to(&mut out, ImageFormat::Jpeg)
        .map_err(Error::Encoding)?;
    Ok(out.into_inner())
}

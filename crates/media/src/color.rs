use image::DynamicImage;

use crate::error::{Error, Result};

/// Averaged color of a raster, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Lowercase `#rrggbb` form, as used for the reply caption.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl std::fmt::Display for ColorSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Reduce every pixel of the raster to one [`ColorSample`].
///
/// Each channel is summed independently over a row-major scan, then divided
/// by the pixel count with truncating integer division. Sources with more
/// than 8 bits per channel are scaled to the 0-255 range before
/// accumulation.
pub fn average_color(raster: &DynamicImage) -> Result<ColorSample> {
    let (width, height) = (raster.width(), raster.height());
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 {
        return Err(Error::invalid_image(format!(
            "zero-pixel raster ({width}x{height})"
        )));
    }

    // The Rgb8 conversion scales 16-bit channels down to 0-255 and drops
    // alpha, so every source feeds the accumulators in the same range.
    let rgb = raster.to_rgb8();
    let mut sums = [0u64; 3];
    for pixel in rgb.pixels() {
        sums[0] += u64::from(pixel[0]);
        sums[1] += u64::from(pixel[1]);
        sums[2] += u64::from(pixel[2]);
    }

    // Each mean is a quotient of u8 values, so the casts cannot truncate.
    Ok(ColorSample {
        red: (sums[0] / pixel_count) as u8,
        green: (sums[1] / pixel_count) as u8,
        blue: (sums[2] / pixel_count) as u8,
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        image::{ImageBuffer, Rgb, RgbImage},
        rstest::rstest,
    };

    use super::*;

    #[test]
    fn single_pixel_is_exact() {
        let raster = RgbImage::from_pixel(1, 1, Rgb([58, 127, 209]));
        let sample = average_color(&DynamicImage::ImageRgb8(raster)).unwrap();
        assert_eq!(sample, ColorSample::new(58, 127, 209));
    }

    #[test]
    fn uniform_image_averages_to_its_color() {
        let raster = RgbImage::from_pixel(7, 5, Rgb([200, 100, 50]));
        let sample = average_color(&DynamicImage::ImageRgb8(raster)).unwrap();
        assert_eq!(sample, ColorSample::new(200, 100, 50));
    }

    #[test]
    fn division_truncates() {
        // Red channels 1 and 2 average to 1, not 1.5 rounded up.
        let raster = RgbImage::from_fn(2, 1, |x, _| Rgb([1 + x as u8, 0, 0]));
        let sample = average_color(&DynamicImage::ImageRgb8(raster)).unwrap();
        assert_eq!(sample.red, 1);
    }

    #[test]
    fn channel_means_stay_within_extremes() {
        let raster = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, (x * y) as u8])
        });
        let (mut min, mut max) = ([255u8; 3], [0u8; 3]);
        for pixel in raster.pixels() {
            for c in 0..3 {
                min[c] = min[c].min(pixel[c]);
                max[c] = max[c].max(pixel[c]);
            }
        }
        let sample = average_color(&DynamicImage::ImageRgb8(raster)).unwrap();
        for (value, (lo, hi)) in [sample.red, sample.green, sample.blue]
            .into_iter()
            .zip(min.into_iter().zip(max))
        {
            assert!(value >= lo && value <= hi);
        }
    }

    #[test]
    fn zero_pixel_raster_is_invalid() {
        let raster = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            average_color(&raster),
            Err(Error::InvalidImage { .. })
        ));
    }

    #[test]
    fn sixteen_bit_channels_normalize_to_eight() {
        // 0x8080 scales to 128, full-range to 255.
        let raster: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(4, 4, Rgb([0x8080, 0xFFFF, 0]));
        let sample = average_color(&DynamicImage::ImageRgb16(raster)).unwrap();
        assert_eq!(sample, ColorSample::new(128, 255, 0));
    }

    #[rstest]
    #[case(ColorSample::new(58, 127, 209), "#3a7fd1")]
    #[case(ColorSample::new(200, 100, 50), "#c86432")]
    #[case(ColorSample::new(0, 0, 0), "#000000")]
    #[case(ColorSample::new(255, 255, 255), "#ffffff")]
    fn hex_formatting(#[case] sample: ColorSample, #[case] expected: &str) {
        assert_eq!(sample.hex(), expected);
        assert_eq!(sample.to_string(), expected);
    }
}

//! Image pipeline: format sniffing, color averaging, preview swatch rendering.

pub mod color;
pub mod decode;
pub mod error;
pub mod preview;

pub use {
    color::{ColorSample, average_color},
    decode::{DecodeOutcome, decode},
    error::{Error, Result},
    preview::{PREVIEW_HEIGHT, PREVIEW_WIDTH, render_preview},
};

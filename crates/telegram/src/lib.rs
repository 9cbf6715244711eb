//! Telegram glue for swatchbot.
//!
//! Long-polls the Bot API for photo/document messages, runs the image
//! pipeline from `swatchbot-media`, and replies with the rendered swatch.

pub mod bot;
pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod outbound;

pub use {
    config::TelegramConfig,
    error::{Error, Result},
};

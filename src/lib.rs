//! # Darkroom Telegram Bot
//!
//! A Telegram bot that applies quick effects to user photos: pixelation,
//! ASCII art, negatives, mirroring, heatmap colorization and long-edge
//! resizing.

pub mod bot;
pub mod content;
pub mod dialogue;
pub mod imaging;
pub mod imaging_config;
pub mod imaging_errors;

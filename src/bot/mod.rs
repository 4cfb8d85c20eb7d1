//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming text, photo, and document messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages
//! - `transform_runner`: Downloads the stored photo and runs the chosen effect

pub mod callback_handler;
pub mod message_handler;
pub mod transform_runner;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use transform_runner::{download_file_bytes, run_effect};
pub use ui_builder::{create_mirror_keyboard, create_options_keyboard, format_ascii_block};

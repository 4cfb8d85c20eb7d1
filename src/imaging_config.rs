//! # Imaging Configuration Module
//!
//! This module defines configuration structures for the effect pipeline,
//! including transform parameters, download limits and retry settings.

// Constants for effect configuration
pub const DEFAULT_ASCII_WIDTH: u32 = 40;
pub const DEFAULT_ASCII_CHARSET: &str = "@%#*+=-:. ";
pub const DEFAULT_PIXELATE_BLOCK: u32 = 20;
pub const DEFAULT_OUTPUT_MAX_DIMENSION: u32 = 512;
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB limit for photo downloads
/// Telegram rejects messages past 4096 characters; ASCII replies stay under this.
pub const MESSAGE_CHAR_LIMIT: usize = 4000;

/// Retry configuration for photo downloads
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Delay between retries in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for a single download request in seconds
    pub download_timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_delay_ms: 500,
            download_timeout_secs: 30,
        }
    }
}

/// Configuration structure for the effect pipeline
#[derive(Debug, Clone)]
pub struct ImagingConfig {
    /// Column count for ASCII art rendering
    pub ascii_width: u32,
    /// Default intensity charset, darkest glyph first
    pub ascii_charset: String,
    /// Square block edge for pixelation
    pub pixelate_block_size: u32,
    /// Long-edge cap for the resize effect
    pub output_max_dimension: u32,
    /// Maximum allowed download size in bytes
    pub max_file_size: u64,
    /// Download retry settings
    pub retry: RetryConfig,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            ascii_width: DEFAULT_ASCII_WIDTH,
            ascii_charset: DEFAULT_ASCII_CHARSET.to_string(),
            pixelate_block_size: DEFAULT_PIXELATE_BLOCK,
            output_max_dimension: DEFAULT_OUTPUT_MAX_DIMENSION,
            max_file_size: MAX_FILE_SIZE,
            retry: RetryConfig::default(),
        }
    }
}

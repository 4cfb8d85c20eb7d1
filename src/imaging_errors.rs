//! # Imaging Error Types Module
//!
//! This module defines custom error types used throughout the effect
//! pipeline. It provides structured error handling for download, codec,
//! transform and delivery failures.

/// Custom error types for effect operations
#[derive(Debug, Clone)]
pub enum ImagingError {
    /// Telegram file download errors
    Download(String),
    /// Image decoding errors
    Decode(String),
    /// Image encoding errors
    Encode(String),
    /// Result delivery errors
    Send(String),
    /// ASCII rendering was requested with no characters to draw with
    EmptyCharset,
    /// The image cannot support the requested effect geometry
    InvalidDimensions(String),
}

impl std::fmt::Display for ImagingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagingError::Download(msg) => write!(f, "Download error: {msg}"),
            ImagingError::Decode(msg) => write!(f, "Decode error: {msg}"),
            ImagingError::Encode(msg) => write!(f, "Encode error: {msg}"),
            ImagingError::Send(msg) => write!(f, "Send error: {msg}"),
            ImagingError::EmptyCharset => write!(f, "ASCII charset is empty"),
            ImagingError::InvalidDimensions(msg) => write!(f, "Invalid dimensions: {msg}"),
        }
    }
}

impl std::error::Error for ImagingError {}

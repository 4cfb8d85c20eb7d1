//! Transform Runner module: downloads the stored photo, applies the chosen
//! effect and delivers the result, degrading to a per-chat error reply on
//! any failure.

use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, ParseMode};
use tracing::{debug, error, info, warn};

use crate::dialogue::StoredPhoto;
use crate::imaging::{self, Effect, Rendered};
use crate::imaging_config::ImagingConfig;
use crate::imaging_errors::ImagingError;

use super::ui_builder::format_ascii_block;

/// Download a Telegram file into memory, with the configured retry.
pub async fn download_file_bytes(
    bot: &Bot,
    file_id: &FileId,
    config: &ImagingConfig,
) -> Result<Vec<u8>, ImagingError> {
    let file = bot
        .get_file(file_id.clone())
        .await
        .map_err(|e| ImagingError::Download(e.to_string()))?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let mut attempt = 0;
    loop {
        match fetch_bytes(&url, config).await {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "Photo downloaded");
                return Ok(bytes);
            }
            // File downloads are idempotent, so a flat retry is safe.
            Err(e) if attempt < config.retry.max_retries => {
                attempt += 1;
                warn!(attempt, error = %e, "Photo download failed, retrying");
                tokio::time::sleep(Duration::from_millis(config.retry.retry_delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn fetch_bytes(url: &str, config: &ImagingConfig) -> Result<Vec<u8>, ImagingError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.retry.download_timeout_secs))
        .build()
        .map_err(|e| ImagingError::Download(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ImagingError::Download(e.to_string()))?;

    // Check Content-Length header to prevent downloading oversized files
    if let Some(content_length) = response.content_length() {
        if content_length > config.max_file_size {
            return Err(ImagingError::Download(format!(
                "file too large: {content_length} bytes (maximum allowed: {} bytes)",
                config.max_file_size
            )));
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImagingError::Download(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Run an effect against the stored photo and send the result back.
///
/// Failures are converted into a user-visible reply for this chat; they
/// never propagate into the dispatcher.
pub async fn run_effect(
    bot: &Bot,
    chat_id: ChatId,
    photo: &StoredPhoto,
    effect: Effect,
    config: &ImagingConfig,
) -> Result<()> {
    if let Err(e) = try_run_effect(bot, chat_id, photo, &effect, config).await {
        error!(user_id = %chat_id, error = %e, "Effect failed");
        bot.send_message(chat_id, user_error_message(&e)).await?;
    }
    Ok(())
}

async fn try_run_effect(
    bot: &Bot,
    chat_id: ChatId,
    photo: &StoredPhoto,
    effect: &Effect,
    config: &ImagingConfig,
) -> Result<(), ImagingError> {
    let bytes = download_file_bytes(bot, &photo.file_id, config).await?;
    let image = imaging::decode(&bytes)?;
    debug!(
        user_id = %chat_id,
        width = image.width(),
        height = image.height(),
        "Photo decoded"
    );

    match imaging::apply(&image, effect)? {
        Rendered::Image(output) => {
            let jpeg = imaging::encode_jpeg(&output)?;
            bot.send_photo(chat_id, InputFile::memory(jpeg))
                .await
                .map_err(|e| ImagingError::Send(e.to_string()))?;
        }
        Rendered::Text(art) => {
            bot.send_message(chat_id, format_ascii_block(&art))
                .parse_mode(ParseMode::MarkdownV2)
                .await
                .map_err(|e| ImagingError::Send(e.to_string()))?;
        }
    }

    info!(user_id = %chat_id, effect = ?effect, "Effect delivered");
    Ok(())
}

fn user_error_message(error: &ImagingError) -> String {
    match error {
        ImagingError::Download(_) => {
            "I couldn't download that photo from Telegram. Please send it again."
        }
        ImagingError::Decode(_) => {
            "That file doesn't look like an image I can read. Try another one."
        }
        ImagingError::Encode(_) | ImagingError::Send(_) => {
            "Something went wrong while sending the result. Please try again."
        }
        ImagingError::EmptyCharset => {
            "The ASCII charset is empty. Send me a few characters first, darkest one first."
        }
        ImagingError::InvalidDimensions(_) => {
            "That image is too small for this effect. Try a larger photo."
        }
    }
    .to_string()
}

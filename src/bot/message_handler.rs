//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tracing::{debug, info};

use crate::content;
use crate::dialogue::{parse_orientation, validate_charset, ChatDialogue, ChatState, StoredPhoto};
use crate::imaging::Effect;
use crate::imaging_config::ImagingConfig;

use super::transform_runner::run_effect;
use super::ui_builder::{
    create_mirror_keyboard, create_options_keyboard, expired_text, help_text, unsupported_text,
    welcome_text,
};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: ChatDialogue,
    config: Arc<ImagingConfig>,
) -> Result<()> {
    if msg.text().is_some() {
        handle_text_message(&bot, &msg, dialogue, config).await?;
    } else if msg.photo().is_some() {
        handle_photo_message(&bot, &msg, dialogue).await?;
    } else if msg.document().is_some() {
        handle_document_message(&bot, &msg, dialogue).await?;
    } else {
        handle_unsupported_message(&bot, &msg).await?;
    }

    Ok(())
}

/// Clear the session and prompt for a new photo if the stored one is too
/// old. Returns `true` when the caller should stop processing.
pub async fn expire_if_stale(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &ChatDialogue,
    photo: &StoredPhoto,
) -> Result<bool> {
    if !photo.is_expired(Utc::now()) {
        return Ok(false);
    }
    info!(user_id = %chat_id, "Session expired, clearing stored photo");
    dialogue.exit().await?;
    bot.send_message(chat_id, expired_text()).await?;
    Ok(true)
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    dialogue: ChatDialogue,
    config: Arc<ImagingConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    // Commands answer the same way in every conversation state.
    if let Some(command) = text.strip_prefix('/') {
        return handle_command(bot, msg, command).await;
    }

    match dialogue.get().await? {
        Some(ChatState::AwaitingOrientation { photo, charset }) => {
            if expire_if_stale(bot, msg.chat.id, &dialogue, &photo).await? {
                return Ok(());
            }
            // In this sub-flow plain text is the direction answer.
            match parse_orientation(text) {
                Some(orientation) => {
                    run_effect(bot, msg.chat.id, &photo, Effect::Mirror(orientation), &config)
                        .await?;
                    dialogue
                        .update(ChatState::AwaitingChoice {
                            photo: photo.renewed(),
                            charset,
                        })
                        .await?;
                }
                None => {
                    bot.send_message(
                        msg.chat.id,
                        "Horizontal or vertical? Use the buttons or reply \"horizontal\" or \"vertical\".",
                    )
                    .reply_markup(create_mirror_keyboard())
                    .await?;
                }
            }
        }
        Some(ChatState::AwaitingChoice { photo, .. }) => {
            if expire_if_stale(bot, msg.chat.id, &dialogue, &photo).await? {
                return Ok(());
            }
            // Plain text while a photo is loaded updates this chat's charset.
            match validate_charset(text) {
                Ok(validated) => {
                    info!(
                        user_id = %msg.chat.id,
                        glyphs = validated.chars().count(),
                        "Stored custom ASCII charset"
                    );
                    dialogue
                        .update(ChatState::AwaitingChoice {
                            photo,
                            charset: Some(validated),
                        })
                        .await?;
                    bot.send_message(
                        msg.chat.id,
                        "Charset saved! Pick ASCII Art to render with it.",
                    )
                    .await?;
                }
                Err("empty") => {
                    bot.send_message(
                        msg.chat.id,
                        "That charset is empty — send a few characters, darkest one first.",
                    )
                    .await?;
                }
                Err("too_long") => {
                    bot.send_message(
                        msg.chat.id,
                        "That's more characters than I can use — 256 at most.",
                    )
                    .await?;
                }
                Err(_) => {
                    bot.send_message(
                        msg.chat.id,
                        "Backticks, backslashes and control characters can't go in a charset — try again without them.",
                    )
                    .await?;
                }
            }
        }
        None | Some(ChatState::Idle) => {
            bot.send_message(
                msg.chat.id,
                "Send me a photo and I'll show you what I can do with it!",
            )
            .await?;
        }
    }
    Ok(())
}

async fn handle_command(bot: &Bot, msg: &Message, command: &str) -> Result<()> {
    // Strip an optional @botname suffix from group-chat commands.
    let command = command.split('@').next().unwrap_or(command);
    match command {
        "start" => {
            bot.send_message(msg.chat.id, welcome_text()).await?;
        }
        "help" => {
            bot.send_message(msg.chat.id, help_text()).await?;
        }
        "joke" => {
            bot.send_message(msg.chat.id, content::random_joke()).await?;
        }
        "compliment" => {
            bot.send_message(msg.chat.id, content::random_compliment())
                .await?;
        }
        _ => {
            debug!(user_id = %msg.chat.id, command, "Unknown command");
            bot.send_message(msg.chat.id, "I don't know that command. Try /help.")
                .await?;
        }
    }
    Ok(())
}

async fn handle_photo_message(bot: &Bot, msg: &Message, dialogue: ChatDialogue) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received photo message from user");

    if let Some(photos) = msg.photo() {
        // Variants arrive smallest first; keep the highest resolution.
        if let Some(largest_photo) = photos.last() {
            store_photo(bot, msg, dialogue, largest_photo.file.id.clone()).await?;
        }
    }
    Ok(())
}

async fn handle_document_message(bot: &Bot, msg: &Message, dialogue: ChatDialogue) -> Result<()> {
    if let Some(doc) = msg.document() {
        if let Some(mime_type) = &doc.mime_type {
            if mime_type.to_string().starts_with("image/") {
                debug!(user_id = %msg.chat.id, mime_type = %mime_type, "Received image document from user");
                store_photo(bot, msg, dialogue, doc.file.id.clone()).await?;
            } else {
                debug!(user_id = %msg.chat.id, mime_type = %mime_type, "Received non-image document from user");
                bot.send_message(msg.chat.id, unsupported_text()).await?;
            }
        } else {
            debug!(user_id = %msg.chat.id, "Received document without mime type from user");
            bot.send_message(msg.chat.id, unsupported_text()).await?;
        }
    }
    Ok(())
}

async fn store_photo(
    bot: &Bot,
    msg: &Message,
    dialogue: ChatDialogue,
    file_id: FileId,
) -> Result<()> {
    // A new upload replaces whatever was on file; a saved charset is kept.
    let charset = match dialogue.get().await? {
        Some(ChatState::AwaitingChoice { charset, .. })
        | Some(ChatState::AwaitingOrientation { charset, .. }) => charset,
        _ => None,
    };

    dialogue
        .update(ChatState::AwaitingChoice {
            photo: StoredPhoto::new(file_id),
            charset,
        })
        .await?;
    info!(user_id = %msg.chat.id, "Stored photo, awaiting effect choice");

    bot.send_message(
        msg.chat.id,
        "I got your photo! Choose what you'd like to do with it.",
    )
    .reply_markup(create_options_keyboard())
    .await?;
    Ok(())
}

async fn handle_unsupported_message(bot: &Bot, msg: &Message) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received unsupported message type from user");
    bot.send_message(msg.chat.id, unsupported_text()).await?;
    Ok(())
}

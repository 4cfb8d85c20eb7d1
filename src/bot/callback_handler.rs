//! Callback Handler module for processing inline keyboard callback queries

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::dialogue::{parse_orientation, ChatDialogue, ChatState, MenuAction};
use crate::imaging::Effect;
use crate::imaging_config::ImagingConfig;

use super::message_handler::expire_if_stale;
use super::transform_runner::run_effect;
use super::ui_builder::{create_mirror_keyboard, create_options_keyboard, no_photo_text};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: ChatDialogue,
    config: Arc<ImagingConfig>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    let data = q.data.clone().unwrap_or_default();
    let Some(message) = q.message.clone() else {
        // The originating message is gone; nothing left to act on.
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;

    match dialogue.get().await? {
        Some(ChatState::AwaitingChoice { photo, charset }) => {
            match MenuAction::from_tag(&data) {
                Some(MenuAction::Mirror) => {
                    bot.answer_callback_query(q.id.clone()).await?;
                    if expire_if_stale(&bot, chat_id, &dialogue, &photo).await? {
                        return Ok(());
                    }
                    bot.send_message(chat_id, "Mirror horizontally or vertically?")
                        .reply_markup(create_mirror_keyboard())
                        .await?;
                    dialogue
                        .update(ChatState::AwaitingOrientation { photo, charset })
                        .await?;
                }
                Some(action) => {
                    bot.answer_callback_query(q.id.clone())
                        .text(action.acknowledgement())
                        .await?;
                    if expire_if_stale(&bot, chat_id, &dialogue, &photo).await? {
                        return Ok(());
                    }
                    // Mirror is handled above; everything else maps straight
                    // to an effect.
                    let Some(effect) = direct_effect(action, charset.as_deref(), &config) else {
                        return Ok(());
                    };
                    run_effect(&bot, chat_id, &photo, effect, &config).await?;
                    dialogue
                        .update(ChatState::AwaitingChoice {
                            photo: photo.renewed(),
                            charset,
                        })
                        .await?;
                }
                None => {
                    bot.answer_callback_query(q.id.clone()).await?;
                    if parse_orientation(&data).is_some() {
                        // Direction button from an earlier mirror prompt.
                        bot.send_message(chat_id, "Pick an effect first.")
                            .reply_markup(create_options_keyboard())
                            .await?;
                    } else {
                        warn!(user_id = %q.from.id, tag = %data, "Unrecognized callback tag");
                    }
                }
            }
        }
        Some(ChatState::AwaitingOrientation { photo, charset }) => {
            match parse_orientation(&data) {
                Some(orientation) => {
                    bot.answer_callback_query(q.id.clone())
                        .text("Mirroring your image…")
                        .await?;
                    if expire_if_stale(&bot, chat_id, &dialogue, &photo).await? {
                        return Ok(());
                    }
                    run_effect(&bot, chat_id, &photo, Effect::Mirror(orientation), &config)
                        .await?;
                    dialogue
                        .update(ChatState::AwaitingChoice {
                            photo: photo.renewed(),
                            charset,
                        })
                        .await?;
                }
                None => {
                    // Still waiting for a direction; any other button
                    // re-prompts.
                    bot.answer_callback_query(q.id.clone()).await?;
                    bot.send_message(chat_id, "Horizontal or vertical? Pick one below.")
                        .reply_markup(create_mirror_keyboard())
                        .await?;
                }
            }
        }
        None | Some(ChatState::Idle) => {
            // Menu press with no photo on file gets a friendly nudge.
            bot.answer_callback_query(q.id.clone()).await?;
            bot.send_message(chat_id, no_photo_text()).await?;
        }
    }

    Ok(())
}

fn direct_effect(
    action: MenuAction,
    charset: Option<&str>,
    config: &ImagingConfig,
) -> Option<Effect> {
    match action {
        MenuAction::Pixelate => Some(Effect::Pixelate {
            block_size: config.pixelate_block_size,
        }),
        MenuAction::Ascii => Some(Effect::AsciiArt {
            width: config.ascii_width,
            charset: charset.unwrap_or(&config.ascii_charset).to_string(),
        }),
        MenuAction::Negative => Some(Effect::Negative),
        MenuAction::Heatmap => Some(Effect::Heatmap),
        MenuAction::Resize => Some(Effect::Resize {
            max_dimension: config.output_max_dimension,
        }),
        // Mirror needs a direction answer first.
        MenuAction::Mirror => None,
    }
}

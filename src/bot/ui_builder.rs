//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::dialogue::MenuAction;
use crate::imaging::MirrorOrientation;

/// Create the inline keyboard offering the available effects
pub fn create_options_keyboard() -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = MenuAction::ALL
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|action| InlineKeyboardButton::callback(action.label(), action.tag()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Create the inline keyboard for choosing a mirror direction
pub fn create_mirror_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Horizontal", MirrorOrientation::Horizontal.tag()),
        InlineKeyboardButton::callback("Vertical", MirrorOrientation::Vertical.tag()),
    ]])
}

/// Wrap ASCII art in a MarkdownV2 code fence so spacing survives
pub fn format_ascii_block(art: &str) -> String {
    format!("```\n{}\n```", art.trim_end_matches('\n'))
}

pub fn welcome_text() -> String {
    vec![
        "👋 Hi! I'm Darkroom, a photo effects bot.",
        "Send me a photo and pick an effect: Pixelate, ASCII Art, Negative, Mirror, Heatmap or Resize.",
        "While a photo is loaded you can also send me a run of characters (darkest first) to use for ASCII art.",
        "Commands: /help /joke /compliment",
    ]
    .join("\n\n")
}

pub fn help_text() -> String {
    vec![
        "🖼 How it works:",
        "1. Send me a photo (or an image file).",
        "2. Pick an effect from the menu that appears.",
        "3. For Mirror, choose horizontal or vertical.",
        "4. I'll send back the result — pick another effect any time.",
        "Sending plain text while a photo is loaded sets the ASCII art charset for this chat, darkest character first.",
        "A stored photo expires after 30 minutes; just send it again.",
        "Bonus: /joke and /compliment.",
    ]
    .join("\n\n")
}

pub fn no_photo_text() -> &'static str {
    "I don't have a photo from you yet — send me one first!"
}

pub fn expired_text() -> &'static str {
    "That photo has expired — send me a fresh one to continue."
}

pub fn unsupported_text() -> String {
    vec![
        "I can only work with images.",
        "Send me a photo or an image file and I'll show you the effect menu.",
    ]
    .join("\n\n")
}

//! Per-chat conversation state for the photo effects flow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::FileId;

use crate::imaging::MirrorOrientation;

/// How long a stored photo stays actionable before the session expires
pub const SESSION_TTL_MINUTES: i64 = 30;

/// Represents the conversation state for a single chat
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ChatState {
    #[default]
    Idle,
    /// A photo is on file and the effect menu has been shown
    AwaitingChoice {
        photo: StoredPhoto,
        charset: Option<String>,
    },
    /// Mirror was chosen; waiting for the direction answer
    AwaitingOrientation {
        photo: StoredPhoto,
        charset: Option<String>,
    },
}

/// The most recently uploaded photo for a chat
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredPhoto {
    pub file_id: FileId,
    pub stored_at: DateTime<Utc>,
}

impl StoredPhoto {
    pub fn new(file_id: FileId) -> Self {
        Self {
            file_id,
            stored_at: Utc::now(),
        }
    }

    /// Same photo with a fresh timestamp, for after a delivered result
    pub fn renewed(&self) -> Self {
        Self::new(self.file_id.clone())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.stored_at > Duration::minutes(SESSION_TTL_MINUTES)
    }
}

/// Type alias for our per-chat dialogue
pub type ChatDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;

/// Menu actions carried by the effect keyboard callback tags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Pixelate,
    Ascii,
    Negative,
    Mirror,
    Heatmap,
    Resize,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Pixelate,
        MenuAction::Ascii,
        MenuAction::Negative,
        MenuAction::Mirror,
        MenuAction::Heatmap,
        MenuAction::Resize,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pixelate" => Some(MenuAction::Pixelate),
            "ascii" => Some(MenuAction::Ascii),
            "negative" => Some(MenuAction::Negative),
            "mirror" => Some(MenuAction::Mirror),
            "heatmap" => Some(MenuAction::Heatmap),
            "resize" => Some(MenuAction::Resize),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            MenuAction::Pixelate => "pixelate",
            MenuAction::Ascii => "ascii",
            MenuAction::Negative => "negative",
            MenuAction::Mirror => "mirror",
            MenuAction::Heatmap => "heatmap",
            MenuAction::Resize => "resize",
        }
    }

    /// Button caption on the effect keyboard
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Pixelate => "Pixelate",
            MenuAction::Ascii => "ASCII Art",
            MenuAction::Negative => "Negative",
            MenuAction::Mirror => "Mirror",
            MenuAction::Heatmap => "Heatmap",
            MenuAction::Resize => "Resize",
        }
    }

    /// Short progress note shown while the effect runs
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            MenuAction::Pixelate => "Pixelating your image…",
            MenuAction::Ascii => "Converting your image to ASCII art…",
            MenuAction::Negative => "Creating a negative of your image…",
            MenuAction::Mirror => "Choose a mirror direction…",
            MenuAction::Heatmap => "Rendering your image as a heatmap…",
            MenuAction::Resize => "Resizing your image…",
        }
    }
}

/// Parse a mirror direction from a callback tag or a typed answer
pub fn parse_orientation(input: &str) -> Option<MirrorOrientation> {
    match input.trim().to_lowercase().as_str() {
        "horizontal" | "h" => Some(MirrorOrientation::Horizontal),
        "vertical" | "v" => Some(MirrorOrientation::Vertical),
        _ => None,
    }
}

/// Validates a custom ASCII charset input
pub fn validate_charset(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    // More glyphs than intensity levels can never all be used.
    if trimmed.chars().count() > 256 {
        return Err("too_long");
    }

    // Backticks and backslashes would terminate the fenced ASCII reply.
    if trimmed
        .chars()
        .any(|c| c.is_control() || c == '`' || c == '\\')
    {
        return Err("unsendable");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_validation() {
        // Valid charsets
        assert!(validate_charset("@%#*+=-:. ").is_ok());
        assert!(validate_charset("  .:# ").is_ok());

        // Invalid charsets
        assert!(validate_charset("").is_err());
        assert!(validate_charset("   ").is_err());
        assert!(validate_charset(&"#".repeat(257)).is_err());
        assert!(validate_charset("ab`c").is_err());
        assert!(validate_charset("ab\\c").is_err());
    }

    #[test]
    fn test_charset_trimming() {
        let result = validate_charset("  @#.  ");
        assert_eq!(result.unwrap(), "@#.");
    }

    #[test]
    fn test_menu_action_tags_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_tag(action.tag()), Some(action));
        }
        assert_eq!(MenuAction::from_tag("sepia"), None);
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!(
            parse_orientation("Horizontal"),
            Some(MirrorOrientation::Horizontal)
        );
        assert_eq!(
            parse_orientation(" v "),
            Some(MirrorOrientation::Vertical)
        );
        assert_eq!(parse_orientation("sideways"), None);
    }
}

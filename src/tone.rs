//! Reply tones — the register the generated replies should be written in.
//!
//! Each tone carries a fixed system-prompt fragment. The fragment text is
//! part of the contract with the model; do not reword it casually.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};

/// Closed set of reply tones selectable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Funny,
    Flirty,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Funny,
        Tone::Flirty,
    ];

    /// Comma-separated canonical names, used in validation error messages.
    pub const ALLOWED: &'static str = "professional, friendly, funny, flirty";

    /// Canonical wire string (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Funny => "funny",
            Tone::Flirty => "flirty",
        }
    }

    /// Resolve a canonical string to a tone. Case-sensitive — "Friendly"
    /// is rejected, only the exact wire strings are accepted.
    pub fn from_canonical(s: &str) -> Option<Tone> {
        match s {
            "professional" => Some(Tone::Professional),
            "friendly" => Some(Tone::Friendly),
            "funny" => Some(Tone::Funny),
            "flirty" => Some(Tone::Flirty),
            _ => None,
        }
    }

    /// User-facing label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Funny => "Funny",
            Tone::Flirty => "Flirty",
        }
    }

    /// Emoji glyph shown next to the label in tone pickers.
    pub fn emoji(&self) -> &'static str {
        match self {
            Tone::Professional => "💼",
            Tone::Friendly => "😊",
            Tone::Funny => "😂",
            Tone::Flirty => "😘",
        }
    }

    /// Short description of when this tone fits.
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Professional => "For work emails, LinkedIn, and formal business communication",
            Tone::Friendly => "For friends, family, and casual conversations",
            Tone::Funny => "For humorous chats with close friends",
            Tone::Flirty => "For romantic interests and playful conversations",
        }
    }

    /// System-prompt fragment describing the desired linguistic register.
    pub fn prompt_fragment(&self) -> &'static str {
        match self {
            Tone::Professional => {
                "You are a professional communication assistant. Generate polite, clear, and business-appropriate replies.\n\
                 Use proper grammar, avoid slang, and maintain a respectful tone. Keep replies concise (2-3 sentences max)."
            }
            Tone::Friendly => {
                "You are a friendly communication assistant. Generate warm, casual replies with appropriate emojis.\n\
                 Use conversational language, be helpful and approachable. Keep replies short and natural (2-3 sentences)."
            }
            Tone::Funny => {
                "You are a witty communication assistant. Generate clever, humorous replies with light jokes or puns.\n\
                 Keep it appropriate and fun, use emojis when fitting. Stay brief and entertaining (2-3 sentences)."
            }
            Tone::Flirty => {
                "You are a charming communication assistant. Generate playful, subtly flirty replies with emojis.\n\
                 Be tasteful and fun, not overly forward. Keep it light and engaging (2-3 sentences)."
            }
        }
    }

    /// Tone most users pick for a given platform.
    pub fn recommended_for(platform: Platform) -> Tone {
        match platform {
            Platform::Outlook | Platform::Teams => Tone::Professional,
            Platform::Whatsapp | Platform::Imessage => Tone::Friendly,
            Platform::Instagram | Platform::Slack => Tone::Funny,
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Friendly
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

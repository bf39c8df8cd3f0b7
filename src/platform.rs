//! Messaging platforms — where the reply will be pasted.
//!
//! Each platform carries a style fragment (length, emoji, formality
//! conventions) consumed by prompt construction.

use serde::{Deserialize, Serialize};

/// Closed set of supported messaging platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Whatsapp,
    Imessage,
    Instagram,
    Outlook,
    Slack,
    Teams,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Whatsapp,
        Platform::Imessage,
        Platform::Instagram,
        Platform::Outlook,
        Platform::Slack,
        Platform::Teams,
    ];

    /// Comma-separated canonical names, used in validation error messages.
    pub const ALLOWED: &'static str = "whatsapp, imessage, instagram, outlook, slack, teams";

    /// Canonical wire string (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Imessage => "imessage",
            Platform::Instagram => "instagram",
            Platform::Outlook => "outlook",
            Platform::Slack => "slack",
            Platform::Teams => "teams",
        }
    }

    /// Resolve a canonical string to a platform. Case-sensitive.
    pub fn from_canonical(s: &str) -> Option<Platform> {
        match s {
            "whatsapp" => Some(Platform::Whatsapp),
            "imessage" => Some(Platform::Imessage),
            "instagram" => Some(Platform::Instagram),
            "outlook" => Some(Platform::Outlook),
            "slack" => Some(Platform::Slack),
            "teams" => Some(Platform::Teams),
            _ => None,
        }
    }

    /// User-facing label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Whatsapp => "WhatsApp",
            Platform::Imessage => "iMessage",
            Platform::Instagram => "Instagram",
            Platform::Outlook => "Outlook",
            Platform::Slack => "Slack",
            Platform::Teams => "Microsoft Teams",
        }
    }

    /// Style fragment consumed by prompt construction — the length/emoji/
    /// formality conventions of the platform.
    pub fn style_fragment(&self) -> &'static str {
        match self {
            Platform::Whatsapp => "Use emojis frequently, casual language, keep very short",
            Platform::Imessage => "Natural iOS messaging style, some emojis, conversational",
            Platform::Instagram => "Trendy, emoji-heavy, very casual, keep ultra-short",
            Platform::Outlook => "Professional email style, minimal emojis, proper formatting",
            Platform::Slack => "Professional but casual, use slack conventions like :emoji:",
            Platform::Teams => "Business professional, clear and direct, minimal emojis",
        }
    }

    /// Whether the platform is primarily a business surface.
    pub fn is_business(&self) -> bool {
        matches!(self, Platform::Outlook | Platform::Slack | Platform::Teams)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Whatsapp
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

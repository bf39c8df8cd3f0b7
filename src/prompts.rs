//! Prompt construction — the contract between the pipeline and the model.
//!
//! The rule block and the user instruction are fixed strings; tone and
//! platform contribute their fragments. Do not reword without checking the
//! parser still matches the requested output format.

use crate::platform::Platform;
use crate::tone::Tone;

/// Fixed user instruction sent alongside the screenshot.
pub const USER_PROMPT: &str = "Please read this chat screenshot and generate 3-5 appropriate reply suggestions based on the system instructions. Focus on replying to the most recent message.";

/// Render the system prompt for a (tone, platform) pair.
///
/// Total over the closed enums — every pair has a mapping, so there is no
/// error path here. Invalid user-supplied strings are rejected during
/// request validation, before this is ever called.
pub fn build_system_prompt(tone: Tone, platform: Platform) -> String {
    format!(
        r#"{tone_fragment}

Platform: {platform} - {platform_style}

CRITICAL RULES:
1. Read the entire chat conversation from the screenshot
2. Generate 3-5 distinct reply options (as a bulleted list)
3. Each reply must be 2-3 sentences maximum
4. Match the {platform} messaging style
5. NEVER quote or repeat text from the screenshot
6. NEVER store or remember any content from the image
7. Focus on the most recent message and provide contextual replies
8. Ensure replies are natural and conversational
9. Use appropriate emojis for the platform and tone

Output format:
- Reply option 1
- Reply option 2
- Reply option 3
(etc.)"#,
        tone_fragment = tone.prompt_fragment(),
        platform = platform.as_str(),
        platform_style = platform.style_fragment(),
    )
}

/// Fixed user instruction — read the conversation, reply to the latest
/// message, 3-5 options.
pub fn build_user_prompt() -> &'static str {
    USER_PROMPT
}

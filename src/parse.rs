//! Suggestion parsing — free-text model output to a bounded suggestion list.
//!
//! Models do not reliably honor format instructions, so parsing is
//! two-tier: bulleted lines first, then a sentence-fragment heuristic when
//! no bullets are present. Parsing never fails; the worst case is an empty
//! list, which is a valid outcome ("no suggestions generated").

/// Tunables for suggestion extraction.
///
/// The defaults match the original service constants. They are carried as
/// configuration so they can be adjusted without code changes.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Characters accepted as a leading bullet marker.
    pub bullet_markers: Vec<char>,
    /// Fallback keeps fragments strictly longer than this (in chars).
    pub fallback_min_len: usize,
    /// Fallback keeps fragments strictly shorter than this (in chars).
    pub fallback_max_len: usize,
    /// Hard cap on returned suggestions.
    pub max_suggestions: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            bullet_markers: vec!['-', '•', '*'],
            fallback_min_len: 10,
            fallback_max_len: 200,
            max_suggestions: 5,
        }
    }
}

/// Extract up to `max_suggestions` clean reply suggestions from raw model
/// output.
///
/// Bulleted lines win: if any line starts with a bullet marker, only those
/// lines are returned and the fallback never runs. With zero bulleted
/// lines, the whole text is split on `.` and newlines and fragments of
/// qualifying length are kept. Order is always preserved.
pub fn parse_suggestions(raw: &str, cfg: &ParserConfig) -> Vec<String> {
    let bulleted: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(cfg.bullet_markers.as_slice()))
        .map(|line| {
            // Strip exactly one marker, then the whitespace after it.
            let mut chars = line.chars();
            chars.next();
            chars.as_str().trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .take(cfg.max_suggestions)
        .collect();

    if !bulleted.is_empty() {
        return bulleted;
    }

    // Fallback: sentence fragments of plausible reply length.
    raw.split(['.', '\n'])
        .map(str::trim)
        .filter(|s| {
            let len = s.chars().count();
            len > cfg.fallback_min_len && len < cfg.fallback_max_len
        })
        .map(str::to_string)
        .take(cfg.max_suggestions)
        .collect()
}

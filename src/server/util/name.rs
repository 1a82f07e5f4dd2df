//! Name rules for channels and roles.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_CHANNEL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\-_]").expect("channel character pattern is valid"));
static REPEATED_HYPHENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+").expect("hyphen pattern is valid"));

/// Longest role name Discord accepts.
pub const MAX_ROLE_NAME_LEN: usize = 100;

const FORBIDDEN_ROLE_SEQUENCES: [&str; 4] = ["@", "#", ":", "```"];

/// Normalizes a configured channel name the way Discord stores text channel names.
///
/// Lowercases, turns spaces into hyphens, drops everything outside `[a-z0-9_-]`,
/// collapses hyphen runs and trims hyphens from both ends. An empty result becomes
/// `channel`.
pub fn normalize_channel_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace(' ', "-");
    let stripped = DISALLOWED_CHANNEL_CHARS.replace_all(&lowered, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        "channel".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Checks a role name against Discord's limits.
///
/// # Returns
/// - `Ok(())` - The name can be used
/// - `Err(String)` - Why the name is rejected
pub fn validate_role_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("role name is empty".to_string());
    }

    if name.chars().count() > MAX_ROLE_NAME_LEN {
        return Err(format!(
            "role name must be at most {} characters",
            MAX_ROLE_NAME_LEN
        ));
    }

    if let Some(seq) = FORBIDDEN_ROLE_SEQUENCES.iter().find(|seq| name.contains(*seq)) {
        return Err(format!("role name contains forbidden text '{}'", seq));
    }

    Ok(())
}

/// Truncates text to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

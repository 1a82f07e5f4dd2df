//! Emoji parsing and the emoji key stored with reaction bindings.
//!
//! A custom emoji is keyed by its numeric id in decimal, a unicode emoji by its literal
//! text. Reaction events are reduced to the same key so lookups survive emoji renames.

use once_cell::sync::Lazy;
use regex::Regex;
use serenity::all::{EmojiId, ReactionType};

static CUSTOM_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(a?):(\w+):(\d+)>$").expect("custom emoji pattern is valid"));

/// Emoji as typed in a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEmoji {
    /// `<:name:id>` or `<a:name:id>` markup.
    Custom {
        id: u64,
        name: String,
        animated: bool,
    },
    /// Anything else, passed through unchanged.
    Unicode(String),
}

impl ParsedEmoji {
    /// Parses custom emoji markup, treating every other string as a unicode literal.
    ///
    /// Input is not trimmed; callers strip whitespace from command options first.
    pub fn parse(input: &str) -> Self {
        if let Some(caps) = CUSTOM_EMOJI.captures(input) {
            if let Ok(id) = caps[3].parse::<u64>() {
                return Self::Custom {
                    id,
                    name: caps[2].to_string(),
                    animated: !caps[1].is_empty(),
                };
            }
        }

        Self::Unicode(input.to_string())
    }

    /// Returns the key under which a binding for this emoji is stored.
    pub fn key(&self) -> String {
        match self {
            Self::Custom { id, .. } => id.to_string(),
            Self::Unicode(text) => text.clone(),
        }
    }

    /// Returns a human-readable form for replies.
    pub fn display(&self) -> String {
        match self {
            Self::Custom { id, name, animated } => {
                format!("<{}:{}:{}>", if *animated { "a" } else { "" }, name, id)
            }
            Self::Unicode(text) => text.clone(),
        }
    }

    pub fn to_reaction_type(&self) -> ReactionType {
        match self {
            Self::Custom { id, name, animated } => ReactionType::Custom {
                animated: *animated,
                id: EmojiId::new(*id),
                name: Some(name.clone()),
            },
            Self::Unicode(text) => ReactionType::Unicode(text.clone()),
        }
    }
}

/// Reduces a reaction from a gateway event to its binding key.
///
/// Returns `None` for reaction kinds that cannot be bound.
pub fn reaction_key(reaction: &ReactionType) -> Option<String> {
    match reaction {
        ReactionType::Custom { id, .. } => Some(id.get().to_string()),
        ReactionType::Unicode(text) => Some(text.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_markup_yields_embedded_id() {
        let parsed = ParsedEmoji::parse("<:pepe:123456789012345678>");
        assert_eq!(parsed.key(), "123456789012345678");
        assert!(matches!(parsed, ParsedEmoji::Custom { animated: false, .. }));
    }

    #[test]
    fn animated_markup_is_custom() {
        let parsed = ParsedEmoji::parse("<a:dance:42>");
        assert_eq!(
            parsed,
            ParsedEmoji::Custom {
                id: 42,
                name: "dance".to_string(),
                animated: true,
            }
        );
    }

    #[test]
    fn other_strings_pass_through() {
        assert_eq!(ParsedEmoji::parse("👍").key(), "👍");
        assert_eq!(ParsedEmoji::parse("<:broken>").key(), "<:broken>");
        assert_eq!(ParsedEmoji::parse("not-an-emoji").key(), "not-an-emoji");
    }

    #[test]
    fn whitespace_is_kept() {
        assert_eq!(ParsedEmoji::parse(" 👍 ").key(), " 👍 ");
        assert_eq!(
            ParsedEmoji::parse(" <:pepe:77>"),
            ParsedEmoji::Unicode(" <:pepe:77>".to_string())
        );
    }

    #[test]
    fn reaction_key_matches_parsed_key() {
        let parsed = ParsedEmoji::parse("<:pepe:77>");
        assert_eq!(
            reaction_key(&parsed.to_reaction_type()),
            Some(parsed.key())
        );
        assert_eq!(
            reaction_key(&ReactionType::Unicode("🎉".to_string())),
            Some("🎉".to_string())
        );
    }
}

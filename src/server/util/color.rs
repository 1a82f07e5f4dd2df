//! Role color parsing.

/// Named colors accepted in the configuration document, with their RGB values.
pub const NAMED_COLORS: [(&str, u32); 16] = [
    ("red", 0xe74c3c),
    ("green", 0x2ecc71),
    ("blue", 0x3498db),
    ("yellow", 0xfee75c),
    ("orange", 0xe67e22),
    ("purple", 0x9b59b6),
    ("magenta", 0xe91e63),
    ("gold", 0xf1c40f),
    ("teal", 0x1abc9c),
    ("dark_red", 0x992d22),
    ("dark_green", 0x1f8b4c),
    ("dark_blue", 0x206694),
    ("dark_purple", 0x71368a),
    ("dark_magenta", 0xad1457),
    ("dark_gold", 0xc27c0e),
    ("dark_teal", 0x11806a),
];

/// Parses `#RRGGBB`, `#RGB` or a color name into an RGB value.
///
/// The leading `#` is optional. Returns `None` for anything else.
pub fn parse_color(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if hex.chars().all(|c| c.is_ascii_hexdigit()) {
        match hex.len() {
            6 => return u32::from_str_radix(hex, 16).ok(),
            3 => {
                let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                return u32::from_str_radix(&expanded, 16).ok();
            }
            _ => {}
        }
    }

    let lowered = trimmed.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, value)| *value)
}

/// Formats an RGB value as `#rrggbb`.
pub fn format_color(value: u32) -> String {
    format!("#{:06x}", value)
}

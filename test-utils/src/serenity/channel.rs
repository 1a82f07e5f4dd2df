//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Creates a test Serenity GuildChannel without permission overwrites.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild the channel belongs to
/// - `name` - Channel name
/// - `kind` - Raw Discord channel type (0 = text, 2 = voice, 4 = category)
/// - `parent_id` - Category the channel sits in
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    parent_id: Option<u64>,
) -> GuildChannel {
    create_test_channel_with_overwrites(channel_id, guild_id, name, kind, parent_id, &[])
}

/// Creates a test Serenity GuildChannel with role permission overwrites.
///
/// # Arguments
/// - `overwrites` - `(role_id, allow_bits, deny_bits)` triples
pub fn create_test_channel_with_overwrites(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    parent_id: Option<u64>,
    overwrites: &[(u64, u64, u64)],
) -> GuildChannel {
    let overwrites: Vec<serde_json::Value> = overwrites
        .iter()
        .map(|(role_id, allow, deny)| {
            serde_json::json!({
                "id": role_id.to_string(),
                "type": 0,
                "allow": allow.to_string(),
                "deny": deny.to_string(),
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": 0,
        "nsfw": false,
        "flags": 0,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": overwrites,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}

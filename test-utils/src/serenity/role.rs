//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Creates a test Serenity Role with zero permissions.
///
/// The role is not hoisted, not managed and not mentionable.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let role = create_test_role(123456789, "Admin", 0xFF0000, 10);
/// assert_eq!(role.colour.0, 0xFF0000);
/// ```
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: i16) -> Role {
    role_json(role_id, name, color, position, 0, false)
}

/// Creates a test Serenity Role carrying a permission bitset.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `permissions` - Raw permission bits, e.g. `Permissions::ADMINISTRATOR.bits()`
/// - `managed` - Whether an integration owns the role
pub fn create_test_role_with_permissions(
    role_id: u64,
    name: &str,
    permissions: u64,
    managed: bool,
) -> Role {
    role_json(role_id, name, 0, 1, permissions, managed)
}

fn role_json(
    role_id: u64,
    name: &str,
    color: u32,
    position: i16,
    permissions: u64,
    managed: bool,
) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": color,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.to_string(),
        "managed": managed,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}

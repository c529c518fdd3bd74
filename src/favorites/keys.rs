/// Key layout for the `favorites` partition
///
/// - `fav:{item_id}` -> `{ item, added_at }` (JSON)

pub const FAVORITE_PREFIX: &str = "fav:";

/// Encode a favorite key: fav:{item_id}
pub fn encode_favorite_key(item_id: &str) -> Vec<u8> {
    format!("{FAVORITE_PREFIX}{item_id}").into_bytes()
}

/// Decode a favorite key: fav:{item_id} -> item_id
pub fn decode_favorite_key(key: &[u8]) -> Option<String> {
    let key_str = std::str::from_utf8(key).ok()?;
    key_str.strip_prefix(FAVORITE_PREFIX).map(String::from)
}

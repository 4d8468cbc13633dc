//! Serde helpers for lenient backend payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
///
/// The backend serializes empty collections as `null` in a few places
/// (ticket tags before the first save, summary key points on sparse model
/// output). Combined with `#[serde(default)]` this also covers absent keys.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

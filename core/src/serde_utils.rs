use serde::{Deserialize, Deserializer};

// The API sends `null` for unset strings and lists on some records.
// Use with `#[serde(default, deserialize_with = "serde_utils::null_to_default")]`.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

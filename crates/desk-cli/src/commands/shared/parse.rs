use std::str::FromStr;

use desk_core::errors::CoreError;

/// Parse an enum flag value (case-insensitive, `-` or `_` separated).
pub fn parse_enum<T>(raw: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    raw.parse::<T>().map_err(anyhow::Error::from)
}

/// Parse an optional enum flag value.
pub fn parse_optional<T>(raw: Option<&str>) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = CoreError>,
{
    raw.map(parse_enum).transpose()
}

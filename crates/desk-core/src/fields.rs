//! Normalization rules for free-text triage form fields.
//!
//! Tags are edited as one comma-separated string and categories as a plain
//! text field. These helpers convert between that text form and the values
//! the backend stores.

/// Separator used when rendering tags back into their text form.
pub const TAG_SEPARATOR: &str = ", ";

/// Split comma-separated tag text into tags.
///
/// Each token is trimmed and empty tokens are dropped. Order and duplicates
/// are preserved.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Render tags into their comma-separated text form.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Normalize category text. Blank text means "no category".
#[must_use]
pub fn normalize_category(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

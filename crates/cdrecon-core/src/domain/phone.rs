/// Number of trailing characters kept from a subscriber number.
pub const SUBSCRIBER_SUFFIX_LEN: usize = 10;

/// Reduces a calling or called number to its trailing subscriber digits so
/// that `2347070350149` and `7070350149` compare equal. Shorter values are
/// kept whole; blank values have no suffix.
pub fn subscriber_suffix(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let len = trimmed.chars().count();
    let skip = len.saturating_sub(SUBSCRIBER_SUFFIX_LEN);
    Some(trimmed.chars().skip(skip).collect())
}

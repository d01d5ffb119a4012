//! Listing Search
//!
//! Text folding and the filter/paginate pipeline over rooms.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Room;

/// Normalized queries shorter than this do not filter
pub const MIN_QUERY_LEN: usize = 2;

/// Fold text for matching: lowercase, strip diacritics, turn everything that
/// is not a letter or digit into a space, collapse whitespace
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Advisory flag for the search box hint
pub fn query_too_short(raw: &str) -> bool {
    !raw.trim().is_empty() && normalize(raw).chars().count() < MIN_QUERY_LEN
}

fn haystack(room: &Room) -> String {
    normalize(&[room.name.as_str(), room.location.as_str(), room.description.as_str()].join(" "))
}

/// Rooms matching the query, in original order
pub fn filter_rooms<'a>(rooms: &'a [Room], raw_query: &str) -> Vec<&'a Room> {
    let query = normalize(raw_query);
    if query.chars().count() < MIN_QUERY_LEN {
        return rooms.iter().collect();
    }
    rooms.iter().filter(|room| haystack(room).contains(&query)).collect()
}

/// Never zero, even for an empty result
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1)).max(1)
}

/// One page of an already filtered list
pub fn paginate<'a>(filtered: &[&'a Room], page: usize, per_page: usize) -> Vec<&'a Room> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    filtered.iter().skip(start).take(per_page).copied().collect()
}

//! Client-side ordering of a fetched page

use feruca::{Collator, Tailoring};
use std::cmp::Ordering;

use crate::types::{SortMode, Video};

/// Root-locale collator with punctuation kept significant.
///
/// Accents and case only break ties between otherwise equal titles, and
/// lowercase sorts before uppercase.
fn title_collator() -> Collator {
    Collator::new(Tailoring::default(), false, true)
}

/// Compare two titles in reading order
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    title_collator().collate(a, b)
}

/// Order one page of results for display.
///
/// `Date` keeps the server order. `Title` is a stable sort, so equal titles
/// keep their relative order.
pub fn apply_sort(mode: SortMode, mut videos: Vec<Video>) -> Vec<Video> {
    if mode == SortMode::Title {
        let mut collator = title_collator();
        videos.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
    }
    videos
}

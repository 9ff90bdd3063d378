use chrono::{DateTime, Utc};

use crate::state::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Live,
    Upcoming,
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Live,
            StatusFilter::Live => StatusFilter::Upcoming,
            StatusFilter::Upcoming => StatusFilter::All,
        }
    }
}

pub fn status_filter_label(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "All",
        StatusFilter::Live => "Live",
        StatusFilter::Upcoming => "Upcoming",
    }
}

/// Lowercased `home away league`, the text a search is matched against.
pub fn search_haystack(m: &Match) -> String {
    format!(
        "{} {} {}",
        m.home.to_lowercase(),
        m.away.to_lowercase(),
        m.league.to_lowercase()
    )
}

/// `needle` must already be lowercased.
pub fn matches_search(m: &Match, needle: &str) -> bool {
    needle.is_empty() || search_haystack(m).contains(needle)
}

/// Kickoff reached. An unknown kickoff is neither live nor upcoming.
pub fn is_live_at(m: &Match, now: DateTime<Utc>) -> bool {
    m.start.is_some_and(|start| start <= now)
}

pub fn is_upcoming_at(m: &Match, now: DateTime<Utc>) -> bool {
    m.start.is_some_and(|start| start > now)
}

pub fn passes_status(m: &Match, filter: StatusFilter, now: DateTime<Utc>) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Live => is_live_at(m, now),
        StatusFilter::Upcoming => is_upcoming_at(m, now),
    }
}

/// Indices of `matches` that pass both the search and the status filter,
/// in their original order. Every match is judged against the same `now`.
pub fn filter_indices(
    matches: &[Match],
    search: &str,
    filter: StatusFilter,
    now: DateTime<Utc>,
) -> Vec<usize> {
    let needle = search.to_lowercase();
    matches
        .iter()
        .enumerate()
        .filter(|(_, m)| matches_search(m, &needle) && passes_status(m, filter, now))
        .map(|(idx, _)| idx)
        .collect()
}

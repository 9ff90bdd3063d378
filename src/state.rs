use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::filter::{self, StatusFilter};

pub const PLACEHOLDER_TEAM: &str = "TBD";

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub league: String,
    pub home: String,
    pub away: String,
    pub start: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub matches: Vec<Match>,
    pub matches_loaded: bool,
    pub search: String,
    pub status_filter: StatusFilter,
    pub filtered: Vec<usize>,
    pub selected: usize,
    pub focus: Focus,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            matches: Vec::with_capacity(64),
            matches_loaded: false,
            search: String::new(),
            status_filter: StatusFilter::All,
            filtered: Vec::with_capacity(64),
            selected: 0,
            focus: Focus::List,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    /// Populates the match list. Only the first publication is accepted.
    pub fn set_matches_at(&mut self, matches: Vec<Match>, now: DateTime<Utc>) -> bool {
        if self.matches_loaded {
            self.push_log("[WARN] Ignoring repeated match list");
            return false;
        }
        self.matches = matches;
        self.matches_loaded = true;
        self.refilter_at(now);
        true
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.set_search_at(search, Utc::now());
    }

    pub fn set_search_at(&mut self, search: impl Into<String>, now: DateTime<Utc>) {
        self.search = search.into();
        self.refilter_at(now);
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.refilter_at(Utc::now());
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.refilter_at(Utc::now());
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search.is_empty() {
            self.search.clear();
            self.refilter_at(Utc::now());
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.set_status_filter_at(filter, Utc::now());
    }

    pub fn set_status_filter_at(&mut self, filter: StatusFilter, now: DateTime<Utc>) {
        self.status_filter = filter;
        self.refilter_at(now);
    }

    pub fn cycle_status_filter(&mut self) {
        self.set_status_filter(self.status_filter.next());
    }

    /// Recomputes the filtered view against a single `now`.
    pub fn refilter_at(&mut self, now: DateTime<Utc>) {
        self.filtered =
            filter::filter_indices(&self.matches, &self.search, self.status_filter, now);
        self.clamp_selection();
    }

    pub fn filtered_matches(&self) -> Vec<&Match> {
        self.filtered
            .iter()
            .filter_map(|idx| self.matches.get(*idx))
            .collect()
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.filtered
            .get(self.selected)
            .and_then(|idx| self.matches.get(*idx))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(Vec<Match>),
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    apply_delta_at(state, delta, Utc::now());
}

pub fn apply_delta_at(state: &mut AppState, delta: Delta, now: DateTime<Utc>) {
    match delta {
        Delta::SetMatches(matches) => {
            let count = matches.len();
            if state.set_matches_at(matches, now) {
                state.push_log(format!("[INFO] Loaded {count} matches"));
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

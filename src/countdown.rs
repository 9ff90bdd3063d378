//! Per-card kickoff countdowns driven by one shared ticker.
//!
//! Each visible match owns a [`Countdown`]. The [`CountdownBoard`] mounts a
//! card when its match enters the filtered view, drops it when the match
//! leaves, and on every tick advances only the cards still counting. A card
//! that reaches kickoff unsubscribes itself and never ticks again.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::state::Match;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const LIVE_TEXT: &str = "Live Now";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Counting,
    Live,
    /// No kickoff time; the card shows no countdown and never ticks.
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    start: Option<DateTime<Utc>>,
    state: CountdownState,
    text: String,
    subscribed: bool,
    ticks: u64,
}

impl Countdown {
    pub fn mount(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let mut card = Self {
            start,
            state: CountdownState::Counting,
            text: String::new(),
            subscribed: false,
            ticks: 0,
        };
        match start {
            Some(start) if start > now => {
                card.text = countdown_text(start - now);
                card.subscribed = true;
            }
            Some(_) => {
                card.state = CountdownState::Live;
                card.text = LIVE_TEXT.to_string();
            }
            None => card.state = CountdownState::Unknown,
        }
        card
    }

    /// Advances a counting card. Returns false once the card has stopped.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if !self.subscribed {
            return false;
        }
        let Some(start) = self.start else {
            self.subscribed = false;
            return false;
        };
        self.ticks += 1;
        let diff = start - now;
        if diff <= chrono::Duration::zero() {
            self.state = CountdownState::Live;
            self.text = LIVE_TEXT.to_string();
            self.subscribed = false;
        } else {
            self.text = countdown_text(diff);
        }
        true
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_ticking(&self) -> bool {
        self.subscribed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// `Starts in: {h}h {m}m {s}s`, floored to whole seconds.
pub fn countdown_text(diff: chrono::Duration) -> String {
    let total = diff.num_seconds().max(0);
    let hours = total / 3600;
    let mins = (total / 60) % 60;
    let secs = total % 60;
    format!("Starts in: {hours}h {mins}m {secs}s")
}

pub fn format_kickoff(start: Option<DateTime<Utc>>) -> String {
    match start {
        Some(start) => format!(
            "Kick-off: {}",
            start.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => "Kick-off: TBD".to_string(),
    }
}

#[derive(Debug, Default)]
pub struct CountdownBoard {
    cards: HashMap<String, Countdown>,
}

impl CountdownBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts cards for newly visible matches and drops the rest.
    pub fn sync<'a>(&mut self, visible: impl IntoIterator<Item = &'a Match>, now: DateTime<Utc>) {
        let mut next = HashMap::with_capacity(self.cards.len());
        for m in visible {
            if next.contains_key(&m.id) {
                continue;
            }
            let card = self
                .cards
                .remove(&m.id)
                .unwrap_or_else(|| Countdown::mount(m.start, now));
            next.insert(m.id.clone(), card);
        }
        self.cards = next;
    }

    /// One shared tick for every card still counting. Returns how many ticked.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        self.cards
            .values_mut()
            .filter(|card| card.is_ticking())
            .map(|card| card.tick(now))
            .filter(|ticked| *ticked)
            .count()
    }

    pub fn card(&self, id: &str) -> Option<&Countdown> {
        self.cards.get(id)
    }

    pub fn text(&self, id: &str) -> &str {
        self.cards.get(id).map(Countdown::text).unwrap_or("")
    }

    pub fn mounted(&self) -> usize {
        self.cards.len()
    }

    pub fn active_timers(&self) -> usize {
        self.cards.values().filter(|card| card.is_ticking()).count()
    }
}

use std::sync::mpsc;

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

use soccer_pulse::countdown::{CountdownBoard, LIVE_TEXT};
use soccer_pulse::feed;
use soccer_pulse::filter::StatusFilter;
use soccer_pulse::scoreboard_fetch::parse_scoreboard_json;
use soccer_pulse::state::{AppState, apply_delta_at};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 11, 18, 0, 0).unwrap()
}

fn scoreboard_with_kickoff(start: DateTime<Utc>) -> String {
    format!(
        r#"{{"events": [{{
            "id": "401",
            "date": "{}",
            "league": {{ "name": "FIFA World Cup" }},
            "competitions": [{{ "competitors": [
                {{ "homeAway": "home", "team": {{ "shortDisplayName": "Mexico" }} }},
                {{ "homeAway": "away", "team": {{ "shortDisplayName": "South Africa" }} }}
            ] }}]
        }}]}}"#,
        start.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

#[test]
fn countdown_reaches_live_and_stops() {
    let raw = scoreboard_with_kickoff(base() + Duration::seconds(5));
    let (tx, rx) = mpsc::channel();
    feed::publish(&tx, parse_scoreboard_json(&raw));

    let mut state = AppState::new();
    let mut board = CountdownBoard::new();
    while let Ok(delta) = rx.try_recv() {
        apply_delta_at(&mut state, delta, base());
    }
    assert_eq!(state.filtered.len(), 1);
    board.sync(state.filtered_matches(), base());

    let mut seen = Vec::new();
    for secs in 1..=8 {
        let now = base() + Duration::seconds(secs);
        board.sync(state.filtered_matches(), now);
        board.tick(now);
        seen.push(board.text("401").to_string());
    }

    assert_eq!(
        &seen[..4],
        [
            "Starts in: 0h 0m 4s",
            "Starts in: 0h 0m 3s",
            "Starts in: 0h 0m 2s",
            "Starts in: 0h 0m 1s",
        ]
    );
    assert!(seen[4..].iter().all(|text| text == LIVE_TEXT));

    let card = board.card("401").expect("card stays mounted");
    assert_eq!(card.ticks(), 5);
    assert!(!card.is_ticking());
    assert_eq!(board.active_timers(), 0);
}

#[test]
fn filter_change_unmounts_card() {
    let raw = scoreboard_with_kickoff(base() + Duration::seconds(60));
    let mut state = AppState::new();
    let mut board = CountdownBoard::new();
    state.set_matches_at(parse_scoreboard_json(&raw).expect("valid json"), base());
    board.sync(state.filtered_matches(), base());
    assert_eq!(board.active_timers(), 1);

    state.set_status_filter_at(StatusFilter::Live, base());
    board.sync(state.filtered_matches(), base());
    assert_eq!(board.mounted(), 0);
    assert_eq!(board.tick(base() + Duration::seconds(1)), 0);

    state.set_status_filter_at(StatusFilter::Upcoming, base());
    board.sync(state.filtered_matches(), base());
    assert_eq!(board.mounted(), 1);
}

#[test]
fn failed_load_leaves_working_empty_view() {
    let (tx, rx) = mpsc::channel();
    feed::publish(&tx, parse_scoreboard_json(r#"{"events": [{"id": "1"}]}"#));

    let mut state = AppState::new();
    while let Ok(delta) = rx.try_recv() {
        apply_delta_at(&mut state, delta, base());
    }
    assert!(state.matches.is_empty());
    assert!(!state.matches_loaded);
    state.set_search_at("mex", base());
    assert!(state.filtered.is_empty());
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN] Error fetching matches")));
}

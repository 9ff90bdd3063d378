use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};

use soccer_pulse::countdown::CountdownBoard;
use soccer_pulse::filter::{StatusFilter, filter_indices};
use soccer_pulse::scoreboard_fetch::parse_scoreboard_json;
use soccer_pulse::state::Match;

const TEAMS: [&str; 8] = [
    "Arsenal", "Chelsea", "Liverpool", "Everton", "Real Madrid", "Barcelona", "Inter", "Milan",
];
const LEAGUES: [&str; 4] = ["Premier League", "LaLiga", "Serie A", "MLS"];

fn sample_matches(n: usize) -> Vec<Match> {
    let base = Utc.with_ymd_and_hms(2026, 6, 11, 18, 0, 0).unwrap();
    (0..n)
        .map(|i| Match {
            id: i.to_string(),
            league: LEAGUES[i % LEAGUES.len()].to_string(),
            home: TEAMS[i % TEAMS.len()].to_string(),
            away: TEAMS[(i + 3) % TEAMS.len()].to_string(),
            start: Some(base + Duration::minutes(i as i64 - (n as i64 / 2))),
        })
        .collect()
}

fn sample_scoreboard(n: usize) -> String {
    let events = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"{i}","date":"2026-06-11T18:00Z","league":{{"name":"{}"}},"competitions":[{{"competitors":[{{"homeAway":"home","team":{{"shortDisplayName":"{}"}}}},{{"homeAway":"away","team":{{"shortDisplayName":"{}"}}}}]}}]}}"#,
                LEAGUES[i % LEAGUES.len()],
                TEAMS[i % TEAMS.len()],
                TEAMS[(i + 3) % TEAMS.len()]
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"events":[{events}]}}"#)
}

fn bench_filter(c: &mut Criterion) {
    let matches = sample_matches(2_000);
    let now = Utc.with_ymd_and_hms(2026, 6, 11, 18, 0, 0).unwrap();
    c.bench_function("filter_search_upcoming", |b| {
        b.iter(|| {
            let idx = filter_indices(
                black_box(&matches),
                black_box("MIL"),
                StatusFilter::Upcoming,
                now,
            );
            black_box(idx.len());
        })
    });
}

fn bench_board_tick(c: &mut Criterion) {
    let matches = sample_matches(500);
    let now = Utc.with_ymd_and_hms(2026, 6, 11, 12, 0, 0).unwrap();
    c.bench_function("board_tick", |b| {
        let mut board = CountdownBoard::new();
        board.sync(matches.iter(), now);
        b.iter(|| black_box(board.tick(black_box(now))))
    });
}

fn bench_scoreboard_parse(c: &mut Criterion) {
    let raw = sample_scoreboard(300);
    c.bench_function("scoreboard_parse", |b| {
        b.iter(|| {
            let matches = parse_scoreboard_json(black_box(&raw)).unwrap();
            black_box(matches.len());
        })
    });
}

criterion_group!(benches, bench_filter, bench_board_tick, bench_scoreboard_parse);
criterion_main!(benches);

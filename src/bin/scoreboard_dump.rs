use anyhow::{Context, Result};
use chrono::Utc;

use soccer_pulse::config::Config;
use soccer_pulse::countdown::{Countdown, format_kickoff};
use soccer_pulse::filter::{is_live_at, is_upcoming_at, matches_search};
use soccer_pulse::scoreboard_fetch;

fn main() -> Result<()> {
    let config = Config::load();
    let search = std::env::args().nth(1).unwrap_or_default().to_lowercase();

    let matches = scoreboard_fetch::fetch_scoreboard(&config.scoreboard_url, config.http_timeout)
        .with_context(|| format!("fetching {}", config.scoreboard_url))?;

    let now = Utc::now();
    println!("Scoreboard: {}", config.scoreboard_url);
    println!("Matches: {}", matches.len());
    for m in matches
        .iter()
        .filter(|m| matches_search(m, &search))
    {
        let status = if is_live_at(m, now) {
            "LIVE"
        } else if is_upcoming_at(m, now) {
            "UPCOMING"
        } else {
            "UNKNOWN"
        };
        let card = Countdown::mount(m.start, now);
        println!(
            "{:>10} | {:<8} | {} vs {} | {} | {} | {}",
            m.id,
            status,
            m.home,
            m.away,
            m.league,
            format_kickoff(m.start),
            card.text()
        );
    }

    Ok(())
}

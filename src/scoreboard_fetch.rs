use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::http_client::http_client;
use crate::state::{Match, PLACEHOLDER_TEAM};

pub fn fetch_scoreboard(url: &str, timeout: Duration) -> Result<Vec<Match>> {
    let client = http_client(timeout)?;
    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status} from scoreboard"));
    }
    parse_scoreboard_json(&body)
}

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    #[serde(default)]
    events: Option<Vec<ScoreboardEvent>>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardEvent {
    #[serde(default)]
    id: String,
    #[serde(default)]
    date: Option<String>,
    league: ScoreboardLeague,
    #[serde(default)]
    competitions: Vec<ScoreboardCompetition>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardLeague {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ScoreboardCompetition {
    #[serde(default)]
    competitors: Option<Vec<ScoreboardCompetitor>>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardCompetitor {
    #[serde(rename = "homeAway", default)]
    home_away: Option<String>,
    #[serde(default)]
    team: Option<ScoreboardTeam>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardTeam {
    #[serde(rename = "shortDisplayName", default)]
    short_display_name: Option<String>,
}

/// Normalizes a scoreboard payload. Events keep upstream order; a missing
/// `events` array is an empty list. An event without a `league` object, a
/// competition, or competitors on its first competition fails the whole
/// payload, while a missing id or league name is kept as an empty string.
pub fn parse_scoreboard_json(raw: &str) -> Result<Vec<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let data: ScoreboardResponse =
        serde_json::from_str(trimmed).context("invalid scoreboard json")?;
    let events = data.events.unwrap_or_default();

    let mut matches = Vec::with_capacity(events.len());
    for event in events {
        let competition = event
            .competitions
            .first()
            .with_context(|| format!("event {} has no competitions", event.id))?;
        let competitors = competition
            .competitors
            .as_deref()
            .with_context(|| format!("event {} has no competitors", event.id))?;

        matches.push(Match {
            home: side_name(competitors, "home"),
            away: side_name(competitors, "away"),
            start: event.date.as_deref().and_then(parse_kickoff),
            league: event.league.name,
            id: event.id,
        });
    }

    Ok(matches)
}

fn side_name(competitors: &[ScoreboardCompetitor], role: &str) -> String {
    competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some(role))
        .and_then(|c| c.team.as_ref())
        .and_then(|t| t.short_display_name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(PLACEHOLDER_TEAM)
        .to_string()
}

/// Accepts RFC 3339 and the seconds-less `2024-05-01T19:00Z` form the
/// scoreboard uses.
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%MZ",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Some(dt.and_utc());
        }
    }
    None
}

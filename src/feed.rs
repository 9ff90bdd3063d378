use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use anyhow::Result;

use crate::config::Config;
use crate::scoreboard_fetch;
use crate::state::{Delta, Match};

/// Fetches the scoreboard once on a background thread and publishes the
/// result. Failures are logged and leave the match list empty.
pub fn spawn_loader(tx: Sender<Delta>, config: Config) -> JoinHandle<()> {
    thread::spawn(move || {
        let result =
            scoreboard_fetch::fetch_scoreboard(&config.scoreboard_url, config.http_timeout);
        publish(&tx, result);
    })
}

pub fn publish(tx: &Sender<Delta>, result: Result<Vec<Match>>) {
    let delta = match result {
        Ok(matches) => Delta::SetMatches(matches),
        Err(err) => Delta::Log(format!("[WARN] Error fetching matches: {err:#}")),
    };
    // Receiver gone means the UI already quit.
    let _ = tx.send(delta);
}

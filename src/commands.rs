//! Text-command surface of the demo shell.
//!
//! `search`, `search-down`, `stop-search`, `clear-highlights`,
//! `set-quota`. Parsing is separate from execution so the parser can be
//! tested without an engine: [`Command::parse`] returns `Ok(cmd)` or
//! `Err(usage message)`.

use lazysearch_core::{SearchError, SearchManager, SearchOutcome, SearchParams, VoxelPos};

/// A parsed, validated command ready to run against the [`SearchManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a search: `search <radius> <word>`.
    Search { radius: i32, term: String },
    /// Vertical-restricted search: `search-down <radius> <word>`.
    SearchDown { radius: i32, term: String },
    /// Cancel the running search, if any.
    StopSearch,
    /// Cancel and empty the highlight list.
    ClearHighlights,
    /// Report the quota (`None`) or set it (`Some(n)`).
    Quota(Option<usize>),
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
}

pub const HELP: &str = "\
commands:
  search <radius> <word>       find voxels whose label contains <word>
  search-down <radius> <word>  same, restricted to at most 2 above the origin
  stop-search                  cancel the running search
  clear-highlights             cancel and clear all highlights
  set-quota [n]                show or set the highlight quota
  help                         this text
  quit                         exit";

impl Command {
    /// Parse a raw input line.
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// line returns `Err("")` as a sentinel meaning "nothing to do".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let mut words = input.split_whitespace();
        let word = words.next().unwrap_or_default();
        match word {
            "search" | "search-down" => {
                let usage = format!("usage: {word} <radius> <word>");
                let radius: i32 = words
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or_else(|| usage.clone())?;
                if radius <= 0 {
                    return Err("radius must be a positive integer".to_string());
                }
                let term = words.next().ok_or(usage)?.to_string();
                if word == "search" {
                    Ok(Command::Search { radius, term })
                } else {
                    Ok(Command::SearchDown { radius, term })
                }
            }
            "stop-search" => Ok(Command::StopSearch),
            "clear-highlights" => Ok(Command::ClearHighlights),
            "set-quota" => match words.next() {
                None => Ok(Command::Quota(None)),
                Some(arg) => match arg.parse::<i64>() {
                    Ok(n) if n > 0 => Ok(Command::Quota(Some(n as usize))),
                    Ok(_) => Err("quota must be a positive integer".to_string()),
                    Err(_) => Err("usage: set-quota [n]".to_string()),
                },
            },
            "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

/// Run one command against the manager; origin is the player position of
/// the demo shell. Returns the response line, or an error message.
pub async fn dispatch(
    cmd: Command,
    manager: &SearchManager,
    origin: VoxelPos,
) -> Result<String, String> {
    let as_msg = |err: SearchError| err.to_string();
    match cmd {
        Command::Search { radius, term } => {
            manager
                .start_search(SearchParams::new(origin, radius, &term))
                .await
                .map_err(as_msg)?;
            Ok(format!("searching for '{term}' within radius {radius}…"))
        }
        Command::SearchDown { radius, term } => {
            manager
                .start_search(SearchParams::new(origin, radius, &term).downward())
                .await
                .map_err(as_msg)?;
            Ok(format!("searching downward for '{term}' within radius {radius}…"))
        }
        Command::StopSearch => match manager.stop_search().await.map_err(as_msg)? {
            None => Ok("no search running".to_string()),
            Some(outcome) => Ok(summarize(&outcome)),
        },
        Command::ClearHighlights => {
            let cleared = manager.clear_highlights().await.map_err(as_msg)?;
            Ok(format!("cleared {cleared} highlights"))
        }
        Command::Quota(None) => Ok(format!("current quota: {}", manager.quota())),
        Command::Quota(Some(n)) => {
            let old = manager.quota();
            manager.set_quota(n).map_err(as_msg)?;
            Ok(format!("set quota from {old} to {n}"))
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok("bye".to_string()),
    }
}

/// One-line report of a finished session: count, max radius to one
/// decimal, quota-hit hint.
pub fn summarize(outcome: &SearchOutcome) -> String {
    let mut line = format!(
        "found {} voxels, max search radius {:.1}, in {:.2}s",
        outcome.total_found,
        outcome.max_observed_radius,
        outcome.elapsed.as_secs_f64()
    );
    if outcome.interrupted {
        line.push_str(" (interrupted)");
    }
    if outcome.quota_hit {
        line.push_str(" (hit the highlight quota, see set-quota)");
    }
    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

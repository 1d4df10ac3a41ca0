//! Parser for the weekly site-availability column.
//!
//! The spreadsheet cell is either `ALL DAY` (or left empty) for a fully open
//! schedule, or a sequence of day clauses such as
//! `Monday: 0800-1700; Tuesday: 0900-1200;`. Times are 24-hour values of
//! which only the hour digits matter: minutes are truncated, so `08:00` and
//! `0800` both mean hour 8. The end hour itself is not marked available, so
//! `0800-1700` opens hours 8 through 16.

use anyhow::{Context, Result, bail};

use crate::api::models::{DAY_NAMES, WeeklySchedule};

/// Cell value meaning the site is available around the clock.
const ALL_DAY: &str = "ALL DAY";

/// Parse an availability cell into the 7x24 grid the scan-setup endpoint
/// expects.
///
/// Day names match as plain substrings of their clause (a clause like
/// `EveryMonday` still counts as Monday); days that never appear stay fully
/// unavailable. An unreadable start time falls back to midnight, an
/// unreadable end time fails the row.
pub fn encode(cell: &str) -> Result<WeeklySchedule> {
    if cell.is_empty() || cell == ALL_DAY {
        return Ok(WeeklySchedule::uniform(true));
    }

    let mut schedule = WeeklySchedule::uniform(false);

    for (day_index, day_name) in DAY_NAMES.iter().enumerate() {
        let Some(clause) = cell.split(';').find(|clause| clause.contains(day_name)) else {
            continue;
        };
        let (start, end) = parse_clause(clause, day_name)
            .with_context(|| format!("invalid availability clause {:?}", clause.trim()))?;
        for hour in start..end {
            schedule.days[day_index].hour_blocks[hour].checked = true;
        }
    }

    Ok(schedule)
}

/// Extract the `[start, end)` hour range from a single day clause.
fn parse_clause(clause: &str, day_name: &str) -> Result<(usize, usize)> {
    let rest = match clause.find(day_name) {
        Some(at) => &clause[at + day_name.len()..],
        None => clause,
    };
    let rest = rest.trim_start_matches([':', ' ']);

    let (start_text, end_text) = rest
        .split_once('-')
        .context("expected a <start>-<end> time range")?;

    let start = hour_prefix(start_text).unwrap_or(0);
    let end = hour_prefix(end_text)
        .with_context(|| format!("unreadable end time {:?}", end_text.trim()))?;

    if start > 23 || end > 24 {
        bail!("hours out of range in {:?}-{:?}", start_text, end_text);
    }

    Ok((start, end))
}

/// Parse the first two characters of a time value as an hour, dropping
/// whatever follows (minutes, a colon, trailing text).
fn hour_prefix(text: &str) -> Option<usize> {
    let prefix: String = text.trim().chars().take(2).collect();
    prefix.parse().ok()
}

//! Derived views over content records.
//!
//! Pure functions: no queries, no clock reads.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ibs_content::{Award, Event};

/// Parse a repository date (RFC 3339 timestamp or `YYYY-MM-DD`) as an instant.
///
/// Plain dates are taken as midnight UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Format a repository date as `January 5, 2024`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    parse_instant(value).map_or_else(
        || value.to_owned(),
        |dt| dt.format("%B %-d, %Y").to_string(),
    )
}

/// Format the time of day of a repository timestamp as `09:30 AM` (UTC).
pub fn format_time(value: &str) -> Option<String> {
    parse_instant(value).map(|dt| dt.format("%I:%M %p").to_string())
}

/// Whether an event has started by `now`.
///
/// An event is past iff its date is less than or equal to `now`. Events whose
/// date cannot be parsed are treated as past.
pub fn is_past(event: &Event, now: DateTime<Utc>) -> bool {
    parse_instant(&event.date).is_none_or(|date| date <= now)
}

/// Split events into `(upcoming, past)`, keeping input order in both.
pub fn partition_events(events: Vec<Event>, now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    events.into_iter().partition(|event| !is_past(event, now))
}

/// Group awards by year, highest year first.
///
/// Awards keep their input order within a year.
pub fn group_awards_by_year(awards: Vec<Award>) -> Vec<(i32, Vec<Award>)> {
    let mut by_year: BTreeMap<i32, Vec<Award>> = BTreeMap::new();
    for award in awards {
        by_year.entry(award.year).or_default().push(award);
    }
    by_year.into_iter().rev().collect()
}

/// Deduplicate tags, keeping the first occurrence of each.
pub fn unique_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(*tag))
        .map(str::to_owned)
        .collect()
}

/// Shorten text to at most `max` characters on a word boundary, adding `…`.
pub fn excerpt(text: &str, max: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max).collect();
    let trimmed = cut.rsplit_once(' ').map_or(cut.as_str(), |(head, _)| head);
    format!("{}…", trimmed.trim_end_matches([',', '.', ';', ':']))
}

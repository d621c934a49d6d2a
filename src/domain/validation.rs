//! Validation of session form input.
//!
//! Every function takes the raw text typed into the form and returns the
//! parsed value or a `SessionError::Validation` carrying the message the
//! form shows under its fields.

use super::session::parse_deadline;
use crate::error::SessionError;
use regex::Regex;
use std::sync::OnceLock;

/// Longest average time accepted for pre-filled tasks (one year)
pub const MAX_AVG_SECS: u64 = 365 * 24 * 60 * 60;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\s-]+$").expect("session name pattern is valid"))
}

/// Trimmed session name made of letters, digits, space, `-` or `_`
pub fn validate_name(raw: &str) -> Result<String, SessionError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SessionError::validation("Name required"));
    }
    if !name_pattern().is_match(name) {
        return Err(SessionError::validation(
            "Name: only letters, digits, space, - or _",
        ));
    }
    Ok(name.to_string())
}

pub fn parse_item_count(raw: &str) -> Result<u32, SessionError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(SessionError::validation("Tasks: must be integer ≥1.")),
    }
}

/// Task number to start from; blank means the first task
pub fn parse_current_task(raw: &str, item_count: u32) -> Result<u32, SessionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1);
    }
    match raw.parse::<u32>() {
        Ok(n) if (1..=item_count).contains(&n) => Ok(n),
        _ => Err(SessionError::validation(
            "Current Task: must be between 1 and Number of Tasks.",
        )),
    }
}

/// Average seconds for backfilled tasks, required only when starting past task 1.
/// Fractional input is rounded to whole seconds (minimum 1).
pub fn parse_avg_time(raw: &str, current_task: u32) -> Result<Option<u64>, SessionError> {
    if current_task <= 1 {
        return Ok(None);
    }
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > MAX_AVG_SECS as f64 => Err(
            SessionError::validation("Average time must be at most one year (31536000 seconds)."),
        ),
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Some((secs.round() as u64).max(1))),
        _ => Err(SessionError::validation(
            "Average time must be positive for pre-filling previous tasks.",
        )),
    }
}

/// Optional deadline; blank clears it
pub fn parse_deadline_input(raw: &str) -> Result<Option<String>, SessionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match parse_deadline(raw) {
        Some(_) => Ok(Some(raw.to_string())),
        None => Err(SessionError::validation(
            "Deadline: use YYYY-MM-DDTHH:MM or YYYY-MM-DD HH:MM",
        )),
    }
}

//! Plain-text views of sessions and chart series for the command line.

use super::format::{countdown_text, format_datetime, format_time};
use crate::domain::{ChartOptions, ChartSeries, DeadlineStatus, Session, ViewMode};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

const BAR_WIDTH: usize = 40;

/// Deadline line shown under a session, if it has one
pub fn deadline_text(session: &Session, now: DateTime<Local>) -> Option<String> {
    match session.deadline_status(now) {
        DeadlineStatus::None => None,
        DeadlineStatus::Invalid => Some("Invalid deadline".to_string()),
        DeadlineStatus::Remaining(secs) => Some(countdown_text(secs, "Past deadline")),
    }
}

/// Format a chart value: durations as "1h 2m 3s", counts with up to one decimal
pub fn format_value(value: f64, is_duration: bool) -> String {
    if is_duration {
        format_time(value)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Every session, sorted by name, one per line. The current one is starred.
pub fn render_session_list(
    sessions: &BTreeMap<String, Session>,
    current: Option<&str>,
    now: DateTime<Local>,
) -> String {
    if sessions.is_empty() {
        return "No session yet. Run 'pacer' and press Ctrl+N to create one.\n".to_string();
    }

    let mut out = String::new();
    for (name, session) in sessions {
        let marker = if current == Some(name.as_str()) { '*' } else { ' ' };
        out.push_str(&format!(
            "{} {}  {}/{} tasks",
            marker,
            name,
            session.done(),
            session.item_count
        ));
        if let Some(deadline) = deadline_text(session, now) {
            out.push_str(&format!("  [{}]", deadline));
        }
        out.push('\n');
    }
    out
}

/// Stats block for one session
pub fn render_session_summary(session: &Session, now: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", session.name));
    out.push_str(&format!(
        "  Completed: {}/{} ({:.0}%)\n",
        session.done(),
        session.item_count,
        session.progress_percent()
    ));
    out.push_str(&format!(
        "  Average:   {}\n",
        format_time(session.average_time().unwrap_or(0.0))
    ));
    if let Some(finish) = session.projected_finish(now) {
        out.push_str(&format!(
            "  ETA:       {} ({})\n",
            format_time(session.eta_seconds()),
            format_datetime(&finish)
        ));
    }
    if let Some(deadline) = deadline_text(session, now) {
        out.push_str(&format!("  Deadline:  {}\n", deadline));
    }
    out
}

/// Horizontal text bars, one per label, followed by the running average
pub fn render_chart(series: &ChartSeries, options: &ChartOptions) -> String {
    if series.is_empty() {
        return "No tasks yet\n".to_string();
    }

    let durations = options.values_are_durations();
    let title = match options.view {
        ViewMode::PerTask => options.view.name().to_string(),
        ViewMode::Aggregate => format!(
            "{} {} ({})",
            options.view.name(),
            options.metric.name(),
            options.granularity.name()
        ),
    };

    let max = series.values.iter().cloned().fold(0.0_f64, f64::max);
    let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("{}\n", title);
    for (label, value) in series.labels.iter().zip(&series.values) {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<width$}  {:<bar$}  {}\n",
            label,
            "█".repeat(filled),
            format_value(*value, durations),
            width = label_width,
            bar = BAR_WIDTH
        ));
    }
    out.push_str(&format!(
        "Average: {}\n",
        format_value(series.running_average, durations)
    ));
    out
}

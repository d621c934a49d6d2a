use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// One completed unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Seconds spent on the task
    #[serde(deserialize_with = "whole_seconds")]
    pub time: u64,
    /// Completion time as epoch milliseconds
    #[serde(deserialize_with = "whole_millis")]
    pub datetime: i64,
}

impl Task {
    pub fn new(time: u64, completed_at: DateTime<Local>) -> Self {
        Self {
            time,
            datetime: completed_at.timestamp_millis(),
        }
    }

    /// Completion time in local time, if the stored timestamp is usable
    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        if self.datetime == 0 {
            return None;
        }
        Local.timestamp_millis_opt(self.datetime).single()
    }
}

// Older session files may carry fractional values (backfill with a
// fractional average) or nulls; both still load.
fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if value.is_finite() { value.max(0.0).round() as u64 } else { 0 })
}

fn whole_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if value.is_finite() { value.round() as i64 } else { 0 })
}

/// A named batch of repeatable tasks with a target count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    pub item_count: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Task-list snapshots, most recent last
    #[serde(default)]
    pub undo: Vec<Vec<Task>>,
    #[serde(default)]
    pub redo: Vec<Vec<Task>>,
}

/// Where a session stands relative to its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    None,
    Invalid,
    /// Seconds until the deadline (negative once passed)
    Remaining(i64),
}

impl Session {
    pub fn new(name: String, item_count: u32, deadline: Option<String>) -> Self {
        Self {
            name,
            item_count,
            tasks: Vec::new(),
            deadline,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Create a session that starts mid-way: tasks before `current_task` are
    /// synthesized with `avg_secs` each, spaced back from `now` (oldest first).
    pub fn backfilled(
        name: String,
        item_count: u32,
        deadline: Option<String>,
        current_task: u32,
        avg_secs: u64,
        now: DateTime<Local>,
    ) -> Self {
        let mut session = Self::new(name, item_count, deadline);
        if current_task > 1 {
            let prior = i64::from(current_task - 1);
            let step_ms = i64::try_from(avg_secs).ok().and_then(|s| s.checked_mul(1000));
            let now_ms = now.timestamp_millis();
            session.tasks = (0..prior)
                .map(|i| {
                    // Spacing that overflows leaves the timestamp unset (0)
                    let back = prior - 1 - i;
                    let offset = if back == 0 {
                        Some(0)
                    } else {
                        step_ms.and_then(|step| step.checked_mul(back))
                    };
                    let datetime = offset
                        .and_then(|offset| now_ms.checked_sub(offset))
                        .unwrap_or(0);
                    Task {
                        time: avg_secs,
                        datetime,
                    }
                })
                .collect();
        }
        session
    }

    pub fn done(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_complete(&self) -> bool {
        self.tasks.len() >= self.item_count as usize
    }

    pub fn remaining(&self) -> usize {
        (self.item_count as usize).saturating_sub(self.tasks.len())
    }

    /// Completion percentage, capped at 100
    pub fn progress_percent(&self) -> f64 {
        let total = self.item_count.max(1) as f64;
        (self.done() as f64 / total * 100.0).min(100.0)
    }

    /// Mean of the positive task durations
    pub fn average_time(&self) -> Option<f64> {
        let times: Vec<f64> = self
            .tasks
            .iter()
            .filter(|t| t.time > 0)
            .map(|t| t.time as f64)
            .collect();
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<f64>() / times.len() as f64)
        }
    }

    /// Estimated seconds until every task is done
    pub fn eta_seconds(&self) -> f64 {
        self.remaining() as f64 * self.average_time().unwrap_or(0.0)
    }

    /// Wall-clock time the session should finish at the current pace
    pub fn projected_finish(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let eta = self.eta_seconds();
        if eta <= 0.0 || self.is_complete() {
            return None;
        }
        let eta = Duration::try_seconds(eta.round() as i64)?;
        now.checked_add_signed(eta)
    }

    pub fn deadline_at(&self) -> Option<Option<DateTime<Local>>> {
        let raw = self.deadline.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        Some(parse_deadline(raw))
    }

    pub fn deadline_status(&self, now: DateTime<Local>) -> DeadlineStatus {
        match self.deadline_at() {
            None => DeadlineStatus::None,
            Some(None) => DeadlineStatus::Invalid,
            Some(Some(at)) => DeadlineStatus::Remaining((at - now).num_seconds()),
        }
    }
}

/// Parse a deadline as entered in the session form.
///
/// Accepts `YYYY-MM-DDTHH:MM` (the form's datetime input),
/// `YYYY-MM-DD HH:MM` and RFC 3339.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 9, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_backfill_spacing() {
        let now = fixed_now();
        let session = Session::backfilled("A".to_string(), 10, None, 4, 60, now);

        assert_eq!(session.tasks.len(), 3);
        assert!(session.tasks.iter().all(|t| t.time == 60));
        let stamps: Vec<i64> = session.tasks.iter().map(|t| t.datetime).collect();
        assert_eq!(
            stamps,
            vec![
                now.timestamp_millis() - 120_000,
                now.timestamp_millis() - 60_000,
                now.timestamp_millis(),
            ]
        );
    }

    #[test]
    fn test_backfill_properties_hold_across_inputs() {
        let now = fixed_now();
        for item_count in 2..12u32 {
            for current in 2..=item_count {
                for avg in [1u64, 7, 75, 3600] {
                    let s = Session::backfilled("x".into(), item_count, None, current, avg, now);
                    assert_eq!(s.tasks.len(), (current - 1) as usize);
                    assert!(s.tasks.iter().all(|t| t.time == avg));
                    assert!(s.tasks.windows(2).all(|w| w[0].datetime < w[1].datetime));
                    assert!(s.tasks.last().unwrap().datetime <= now.timestamp_millis());
                }
            }
        }
    }

    #[test]
    fn test_no_backfill_from_first_task() {
        let session = Session::backfilled("A".to_string(), 3, None, 1, 60, fixed_now());
        assert!(session.tasks.is_empty());
    }

    #[test]
    fn test_derived_stats() {
        let now = fixed_now();
        let mut session = Session::new("A".to_string(), 4, None);
        assert_eq!(session.average_time(), None);
        assert_eq!(session.eta_seconds(), 0.0);
        assert_eq!(session.projected_finish(now), None);

        session.tasks.push(Task::new(10, now));
        session.tasks.push(Task::new(30, now));
        session.tasks.push(Task::new(0, now)); // zero durations are ignored

        assert_eq!(session.done(), 3);
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.average_time(), Some(20.0));
        assert_eq!(session.eta_seconds(), 20.0);
        assert_eq!(session.progress_percent(), 75.0);
        assert_eq!(session.projected_finish(now), Some(now + Duration::seconds(20)));
    }

    #[test]
    fn test_progress_capped() {
        let now = fixed_now();
        let mut session = Session::new("A".to_string(), 1, None);
        session.tasks = vec![Task::new(1, now), Task::new(1, now)];
        assert_eq!(session.progress_percent(), 100.0);
        assert!(session.is_complete());
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_deadline_status() {
        let now = fixed_now();
        let mut session = Session::new("A".to_string(), 1, None);
        assert_eq!(session.deadline_status(now), DeadlineStatus::None);

        session.deadline = Some(String::new());
        assert_eq!(session.deadline_status(now), DeadlineStatus::None);

        session.deadline = Some("not a date".to_string());
        assert_eq!(session.deadline_status(now), DeadlineStatus::Invalid);

        session.deadline = Some("2024-09-09T15:05".to_string());
        assert_eq!(session.deadline_status(now), DeadlineStatus::Remaining(3600));

        session.deadline = Some("2024-09-09 14:04".to_string());
        assert_eq!(session.deadline_status(now), DeadlineStatus::Remaining(-60));
    }

    #[test]
    fn test_session_json_shape() {
        let json = r#"{
            "name": "Batch",
            "itemCount": 3,
            "tasks": [{"time": 75.5, "datetime": 1725890700000}],
            "deadline": ""
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.item_count, 3);
        assert_eq!(session.tasks[0].time, 76);
        assert!(session.undo.is_empty());
        assert!(session.redo.is_empty());
        assert_eq!(session.deadline_status(fixed_now()), DeadlineStatus::None);

        let out = serde_json::to_value(&session).unwrap();
        assert_eq!(out["itemCount"], 3);
        assert_eq!(out["tasks"][0]["time"], 76);
    }

    #[test]
    fn test_huge_average_does_not_overflow() {
        let now = fixed_now();
        let session = Session::backfilled("s".into(), 5, None, 3, u64::MAX / 10, now);
        assert_eq!(session.tasks.len(), 2);
        // The newest task sits at `now`, the older one can't be placed
        assert_eq!(session.tasks[0].datetime, 0);
        assert_eq!(session.tasks[1].datetime, now.timestamp_millis());

        let session = Session::backfilled("s".into(), 5, None, 2, 10_000_000_000_000, now);
        assert_eq!(session.projected_finish(now), None);
    }

    #[test]
    fn test_task_completed_at() {
        let now = fixed_now();
        assert_eq!(Task::new(5, now).completed_at(), Some(now));
        assert_eq!(Task { time: 5, datetime: 0 }.completed_at(), None);
    }
}

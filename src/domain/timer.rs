use super::enums::RunStatus;
use super::session::{Session, Task};
use chrono::{DateTime, Duration, Local};
use tracing::debug;

/// Timer state machine. Timing fields only exist in the states that use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running {
        interval_start: DateTime<Local>,
        total_paused: Duration,
    },
    Paused {
        interval_start: DateTime<Local>,
        total_paused: Duration,
        pause_start: DateTime<Local>,
    },
}

/// Per-task stopwatch for the active session (never persisted)
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn status(&self) -> RunStatus {
        match self.state {
            TimerState::Idle => RunStatus::Idle,
            TimerState::Running { .. } => RunStatus::Running,
            TimerState::Paused { .. } => RunStatus::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, TimerState::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    /// Start a fresh interval from Idle, or resume from Paused
    pub fn start(&mut self, now: DateTime<Local>) {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running {
                    interval_start: now,
                    total_paused: Duration::zero(),
                };
                debug!("timer started");
            }
            TimerState::Paused {
                interval_start,
                total_paused,
                pause_start,
            } => {
                self.state = TimerState::Running {
                    interval_start,
                    total_paused: total_paused + (now - pause_start),
                };
                debug!("timer resumed");
            }
            TimerState::Running { .. } => {}
        }
    }

    pub fn pause(&mut self, now: DateTime<Local>) {
        if let TimerState::Running {
            interval_start,
            total_paused,
        } = self.state
        {
            self.state = TimerState::Paused {
                interval_start,
                total_paused,
                pause_start: now,
            };
            debug!("timer paused");
        }
    }

    /// Force the timer back to Idle, dropping all interval data
    pub fn reset(&mut self) {
        if self.state != TimerState::Idle {
            debug!("timer reset");
        }
        self.state = TimerState::Idle;
    }

    /// Whole seconds of unpaused time in the current interval (0 when Idle)
    pub fn elapsed_seconds(&self, now: DateTime<Local>) -> u64 {
        let elapsed = match self.state {
            TimerState::Idle => return 0,
            TimerState::Running {
                interval_start,
                total_paused,
            } => now - interval_start - total_paused,
            TimerState::Paused {
                interval_start,
                total_paused,
                pause_start,
            } => now - interval_start - total_paused - (now - pause_start),
        };
        (elapsed.num_milliseconds().max(0) / 1000) as u64
    }

    /// Record the current interval as a finished task on `session`.
    ///
    /// Only valid while running (not paused) and while the session still has
    /// tasks left. Finishing the last task resets the timer; otherwise a new
    /// interval starts at `now`.
    pub fn complete_task(&mut self, session: &mut Session, now: DateTime<Local>) -> Option<Task> {
        let TimerState::Running { .. } = self.state else {
            return None;
        };
        if session.is_complete() {
            return None;
        }

        let task = Task::new(self.elapsed_seconds(now), now);
        session.record_task(task);
        debug!(session = %session.name, seconds = task.time, "task completed");

        if session.is_complete() {
            self.reset();
        } else {
            self.state = TimerState::Running {
                interval_start: now,
                total_paused: Duration::zero(),
            };
        }
        Some(task)
    }
}

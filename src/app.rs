use crate::domain::validation::{
    parse_avg_time, parse_current_task, parse_deadline_input, parse_item_count, validate_name,
};
use crate::domain::{aggregate, ChartOptions, ChartSeries, RunStatus, Session, TimerEngine, UiMode};
use crate::error::SessionError;
use crate::notifications;
use crate::persistence::{save_settings, Settings};
use crate::report::write_csv;
use crate::store::{NewSession, SessionEdit, SessionStore};
use crate::ticker::Ticker;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

/// Whether the session form creates a new session or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit { original: String },
}

/// Field labels of the session form, in tab order
pub const NEW_FORM_FIELDS: [&str; 5] = [
    "Name",
    "Number of Tasks",
    "Deadline",
    "Current Task",
    "Avg Time (s)",
];
pub const EDIT_FORM_FIELDS: [&str; 3] = ["Name", "Number of Tasks", "Deadline"];

/// Input form state for creating or editing a session
#[derive(Debug, Clone)]
pub struct SessionFormState {
    pub mode: FormMode,
    pub name: String,
    pub item_count: String,
    pub deadline: String,
    pub current_task: String, // New only
    pub avg_time: String,     // New only
    pub editing_field: usize,
    pub error: Option<String>,
}

impl SessionFormState {
    pub fn new_session() -> Self {
        Self {
            mode: FormMode::New,
            name: String::new(),
            item_count: String::new(),
            deadline: String::new(),
            current_task: String::new(),
            avg_time: String::new(),
            editing_field: 0,
            error: None,
        }
    }

    pub fn edit(session: &Session) -> Self {
        Self {
            mode: FormMode::Edit {
                original: session.name.clone(),
            },
            name: session.name.clone(),
            item_count: session.item_count.to_string(),
            deadline: session.deadline.clone().unwrap_or_default(),
            ..Self::new_session()
        }
    }

    pub fn labels(&self) -> &'static [&'static str] {
        match self.mode {
            FormMode::New => &NEW_FORM_FIELDS,
            FormMode::Edit { .. } => &EDIT_FORM_FIELDS,
        }
    }

    /// Field values in the same order as `labels`
    pub fn values(&self) -> Vec<&str> {
        let all = [
            self.name.as_str(),
            self.item_count.as_str(),
            self.deadline.as_str(),
            self.current_task.as_str(),
            self.avg_time.as_str(),
        ];
        all[..self.labels().len()].to_vec()
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        if self.editing_field >= self.labels().len() {
            return None;
        }
        match self.editing_field {
            0 => Some(&mut self.name),
            1 => Some(&mut self.item_count),
            2 => Some(&mut self.deadline),
            3 => Some(&mut self.current_task),
            4 => Some(&mut self.avg_time),
            _ => None,
        }
    }
}

/// Session picker state
#[derive(Debug, Clone)]
pub struct SessionListState {
    pub names: Vec<String>,
    pub selected: usize,
    pub confirm_delete: bool,
}

impl SessionListState {
    pub fn selected_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }
}

/// Main application state
pub struct AppState {
    pub store: SessionStore,
    pub timer: TimerEngine,
    pub ticker: Ticker,
    /// Last sampled elapsed seconds of the running task
    pub task_time: u64,
    pub ui_mode: UiMode,
    pub form: Option<SessionFormState>,
    pub session_list: Option<SessionListState>,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub status: Option<String>,
}

impl AppState {
    pub fn new(
        store: SessionStore,
        settings: Settings,
        settings_path: Option<PathBuf>,
        export_dir: PathBuf,
    ) -> Self {
        let ticker = Ticker::new(Duration::from_millis(settings.tick_ms.max(1)));
        Self {
            store,
            timer: TimerEngine::new(),
            ticker,
            task_time: 0,
            ui_mode: UiMode::Normal,
            form: None,
            session_list: None,
            settings,
            settings_path,
            export_dir,
            status: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.store.current()
    }

    pub fn run_status(&self) -> RunStatus {
        self.timer.status()
    }

    fn current_incomplete(&self) -> bool {
        self.current().is_some_and(|s| !s.is_complete())
    }

    /// Stopped or paused, with tasks left
    pub fn can_start(&self) -> bool {
        self.current_incomplete() && (!self.timer.is_running() || self.timer.is_paused())
    }

    /// Running, not paused, with tasks left
    pub fn can_pause(&self) -> bool {
        self.current_incomplete() && self.timer.is_running() && !self.timer.is_paused()
    }

    pub fn can_complete(&self) -> bool {
        self.can_pause()
    }

    pub fn do_start(&mut self, now: DateTime<Local>) {
        if !self.can_start() {
            return;
        }
        self.timer.start(now);
        self.ticker.arm(Instant::now());
        self.task_time = self.timer.elapsed_seconds(now);
    }

    pub fn do_pause(&mut self, now: DateTime<Local>) {
        if !self.can_pause() {
            return;
        }
        self.task_time = self.timer.elapsed_seconds(now);
        self.timer.pause(now);
        self.ticker.cancel();
    }

    pub fn toggle_start_pause(&mut self, now: DateTime<Local>) {
        if self.can_pause() {
            self.do_pause(now);
        } else if self.can_start() {
            self.do_start(now);
        }
    }

    /// Complete the running task on the current session
    pub fn do_task(&mut self, now: DateTime<Local>) {
        if !self.can_complete() {
            return;
        }

        let timer = &mut self.timer;
        let Some(Some(_task)) = self.store.update_current(|s| timer.complete_task(s, now)) else {
            return;
        };
        self.task_time = 0;

        if !self.timer.is_running() {
            self.ticker.cancel();
            if let Some(session) = self.store.current() {
                if self.settings.notifications {
                    notifications::notify_session_complete(&session.name);
                }
                self.status = Some(format!("Session \"{}\" complete", session.name));
            }
        }
        self.sync_storage_error();
    }

    pub fn do_undo(&mut self) {
        if self.store.update_current(|s| s.undo()) == Some(true) {
            self.reset_timer();
            self.sync_storage_error();
        }
    }

    pub fn do_redo(&mut self) {
        if self.store.update_current(|s| s.redo()) == Some(true) {
            self.reset_timer();
            self.sync_storage_error();
        }
    }

    /// Back to Idle; no sample is taken for the dropped interval
    fn reset_timer(&mut self) {
        self.timer.reset();
        self.ticker.cancel();
        self.task_time = 0;
    }

    /// Sample the running timer when the ticker is due
    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.ticker.poll(Instant::now()) {
            self.task_time = self.timer.elapsed_seconds(now);
        }
        self.sync_storage_error();
    }

    fn sync_storage_error(&mut self) {
        if let Some(message) = self.store.take_storage_error() {
            self.status = Some(message);
        }
    }

    // Session form

    pub fn open_new_form(&mut self) {
        self.form = Some(SessionFormState::new_session());
        self.ui_mode = UiMode::SessionForm;
    }

    /// Open the form on the current session (no-op without one)
    pub fn open_edit_form(&mut self) {
        if let Some(session) = self.store.current() {
            self.form = Some(SessionFormState::edit(session));
            self.ui_mode = UiMode::SessionForm;
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.editing_field = (form.editing_field + 1) % form.labels().len();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = &mut self.form {
            let count = form.labels().len();
            form.editing_field = (form.editing_field + count - 1) % count;
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(field) = self.form.as_mut().and_then(|f| f.field_mut()) {
            field.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(field) = self.form.as_mut().and_then(|f| f.field_mut()) {
            field.pop();
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Validate and apply the form. On error the form stays open with the message.
    pub fn submit_form(&mut self, now: DateTime<Local>) {
        let Some(form) = self.form.take() else {
            return;
        };

        match self.apply_form(&form, now) {
            Ok(name) => {
                self.reset_timer();
                self.ui_mode = UiMode::Normal;
                self.status = Some(match form.mode {
                    FormMode::New => format!("Created \"{}\"", name),
                    FormMode::Edit { .. } => format!("Saved \"{}\"", name),
                });
                self.sync_storage_error();
            }
            Err(e) => {
                self.form = Some(SessionFormState {
                    error: Some(e.to_string()),
                    ..form
                });
            }
        }
    }

    fn apply_form(&mut self, form: &SessionFormState, now: DateTime<Local>) -> Result<String, SessionError> {
        let name = validate_name(&form.name)?;
        let item_count = parse_item_count(&form.item_count)?;

        match &form.mode {
            FormMode::New => {
                let current_task = parse_current_task(&form.current_task, item_count)?;
                let avg_time = parse_avg_time(&form.avg_time, current_task)?;
                let deadline = parse_deadline_input(&form.deadline)?;
                let session = self.store.create(
                    NewSession {
                        name,
                        item_count,
                        deadline,
                        current_task,
                        avg_time,
                    },
                    now,
                )?;
                Ok(session.name.clone())
            }
            FormMode::Edit { original } => {
                let deadline = parse_deadline_input(&form.deadline)?;
                let session = self.store.edit(
                    original,
                    SessionEdit {
                        name,
                        item_count,
                        deadline,
                    },
                )?;
                Ok(session.name.clone())
            }
        }
    }

    // Session list

    pub fn open_session_list(&mut self) {
        let names: Vec<String> = self.store.sessions().keys().cloned().collect();
        let selected = self
            .store
            .current_name()
            .and_then(|current| names.iter().position(|n| n == current))
            .unwrap_or(0);
        self.session_list = Some(SessionListState {
            names,
            selected,
            confirm_delete: false,
        });
        self.ui_mode = UiMode::SessionList;
    }

    pub fn close_session_list(&mut self) {
        self.session_list = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn list_move_up(&mut self) {
        if let Some(list) = &mut self.session_list {
            list.selected = list.selected.saturating_sub(1);
            list.confirm_delete = false;
        }
    }

    pub fn list_move_down(&mut self) {
        if let Some(list) = &mut self.session_list {
            if list.selected + 1 < list.names.len() {
                list.selected += 1;
            }
            list.confirm_delete = false;
        }
    }

    /// Make the selected session current and close the list
    pub fn list_load_selected(&mut self) {
        let Some(name) = self
            .session_list
            .as_ref()
            .and_then(|l| l.selected_name())
            .map(str::to_string)
        else {
            return;
        };

        self.reset_timer();
        match self.store.load(&name) {
            Ok(()) => self.status = Some(format!("Loaded \"{}\"", name)),
            Err(e) => self.status = Some(e.to_string()),
        }
        self.close_session_list();
        self.sync_storage_error();
    }

    pub fn list_request_delete(&mut self) {
        if let Some(list) = &mut self.session_list {
            if list.selected_name().is_some() {
                list.confirm_delete = true;
            }
        }
    }

    pub fn list_cancel_delete(&mut self) {
        if let Some(list) = &mut self.session_list {
            list.confirm_delete = false;
        }
    }

    /// Delete the selected session after confirmation
    pub fn list_confirm_delete(&mut self) {
        let Some(name) = self
            .session_list
            .as_ref()
            .filter(|l| l.confirm_delete)
            .and_then(|l| l.selected_name())
            .map(str::to_string)
        else {
            return;
        };

        let was_current = self.store.current_name() == Some(name.as_str());
        if self.store.delete(&name) {
            self.status = Some(format!("Deleted \"{}\"", name));
        }
        if was_current {
            self.reset_timer();
        }

        let names: Vec<String> = self.store.sessions().keys().cloned().collect();
        if let Some(list) = &mut self.session_list {
            list.selected = list.selected.min(names.len().saturating_sub(1));
            list.names = names;
            list.confirm_delete = false;
        }
        self.sync_storage_error();
    }

    // Chart

    pub fn chart_options(&self) -> ChartOptions {
        self.settings.chart
    }

    pub fn chart_series(&self) -> ChartSeries {
        self.current()
            .map(|s| aggregate(&s.tasks, &self.settings.chart))
            .unwrap_or_default()
    }

    pub fn cycle_view(&mut self) {
        self.settings.chart.view = self.settings.chart.view.next();
        self.persist_settings();
    }

    pub fn cycle_granularity(&mut self) {
        self.settings.chart.granularity = self.settings.chart.granularity.next();
        self.persist_settings();
    }

    pub fn cycle_metric(&mut self) {
        self.settings.chart.metric = self.settings.chart.metric.next();
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = save_settings(path, &self.settings) {
            warn!(error = %e, "failed to save settings");
            self.status = Some(format!("Could not save settings: {}", e));
        }
    }

    /// Write the current session as CSV into the export directory
    pub fn export_current(&mut self) {
        let Some(session) = self.store.current() else {
            return;
        };
        self.status = Some(match write_csv(session, &self.export_dir) {
            Ok(path) => format!("Exported {}", path.display()),
            Err(e) => {
                warn!(error = %e, "csv export failed");
                format!("Export failed: {}", e)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Metric, TimerState, ViewMode};
    use crate::persistence::MemoryStorage;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 9, 9, 10, 0, 0).unwrap()
    }

    fn secs(n: i64) -> DateTime<Local> {
        t0() + ChronoDuration::seconds(n)
    }

    fn create_test_app() -> AppState {
        let store = SessionStore::open(Box::new(MemoryStorage::new()));
        AppState::new(store, Settings::default(), None, std::env::temp_dir())
    }

    fn app_with_session(name: &str, item_count: u32) -> AppState {
        let mut app = create_test_app();
        app.store
            .create(
                NewSession {
                    name: name.to_string(),
                    item_count,
                    deadline: None,
                    current_task: 1,
                    avg_time: None,
                },
                t0(),
            )
            .unwrap();
        app
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.run_status(), RunStatus::Idle);
        assert!(app.current().is_none());
        assert!(!app.can_start());
    }

    #[test]
    fn test_start_without_session_is_noop() {
        let mut app = create_test_app();
        app.do_start(t0());
        assert_eq!(app.run_status(), RunStatus::Idle);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn test_complete_then_undo_scenario() {
        let mut app = app_with_session("A", 3);

        app.do_start(t0());
        assert_eq!(app.task_time, 0);
        assert!(app.ticker.is_armed());

        app.do_task(secs(5));
        let session = app.current().unwrap();
        assert_eq!(session.tasks.len(), 1);
        assert_eq!(session.tasks[0].time, 5);
        assert_eq!(session.tasks[0].datetime, secs(5).timestamp_millis());
        assert_eq!(session.undo, vec![vec![]]);
        assert_eq!(app.run_status(), RunStatus::Running);

        app.do_undo();
        let session = app.current().unwrap();
        assert!(session.tasks.is_empty());
        assert_eq!(session.redo.len(), 1);
        assert_eq!(session.redo[0][0].time, 5);
        assert_eq!(app.timer.state(), TimerState::Idle);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn test_redo_resets_timer() {
        let mut app = app_with_session("A", 3);
        app.do_start(t0());
        app.do_task(secs(5));
        app.do_undo();

        app.do_start(secs(10));
        app.do_redo();
        assert_eq!(app.current().unwrap().tasks.len(), 1);
        assert_eq!(app.run_status(), RunStatus::Idle);
    }

    #[test]
    fn test_last_task_goes_idle() {
        let mut app = app_with_session("A", 2);
        app.do_start(t0());
        app.do_task(secs(3));
        app.do_task(secs(7));

        let session = app.current().unwrap();
        assert!(session.is_complete());
        assert_eq!(session.tasks[1].time, 4);
        assert_eq!(app.run_status(), RunStatus::Idle);
        assert!(!app.ticker.is_armed());
        assert_eq!(app.status.as_deref(), Some("Session \"A\" complete"));

        // Nothing left to start or complete
        app.do_start(secs(8));
        assert_eq!(app.run_status(), RunStatus::Idle);
        app.do_task(secs(9));
        assert_eq!(app.current().unwrap().tasks.len(), 2);
    }

    #[test]
    fn test_complete_ignored_while_paused() {
        let mut app = app_with_session("A", 3);
        app.do_start(t0());
        app.do_pause(secs(4));
        assert_eq!(app.task_time, 4);
        assert!(!app.ticker.is_armed());

        app.do_task(secs(10));
        assert!(app.current().unwrap().tasks.is_empty());
    }

    #[test]
    fn test_toggle_start_pause() {
        let mut app = app_with_session("A", 3);

        app.toggle_start_pause(t0());
        assert_eq!(app.run_status(), RunStatus::Running);

        app.toggle_start_pause(secs(2));
        assert_eq!(app.run_status(), RunStatus::Paused);

        app.toggle_start_pause(secs(10));
        assert_eq!(app.run_status(), RunStatus::Running);

        app.do_task(secs(12));
        // Paused 8 seconds of the 12
        assert_eq!(app.current().unwrap().tasks[0].time, 4);
    }

    #[test]
    fn test_new_session_form() {
        let mut app = create_test_app();
        app.open_new_form();
        assert_eq!(app.ui_mode, UiMode::SessionForm);

        type_text(&mut app, "Batch");
        app.form_next_field();
        type_text(&mut app, "10");
        app.form_next_field();
        app.form_next_field();
        type_text(&mut app, "3");
        app.form_next_field();
        type_text(&mut app, "45");
        app.submit_form(t0());

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.form.is_none());
        let session = app.current().unwrap();
        assert_eq!(session.name, "Batch");
        assert_eq!(session.item_count, 10);
        assert_eq!(session.tasks.len(), 2);
        assert!(session.tasks.iter().all(|t| t.time == 45));
    }

    #[test]
    fn test_form_error_keeps_form_open() {
        let mut app = create_test_app();
        app.open_new_form();
        type_text(&mut app, "Batch");
        app.form_next_field();
        type_text(&mut app, "0");
        app.submit_form(t0());

        assert_eq!(app.ui_mode, UiMode::SessionForm);
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Tasks: must be integer ≥1."));
        assert_eq!(form.name, "Batch");
        assert!(app.current().is_none());
    }

    #[test]
    fn test_backfill_requires_average() {
        let mut app = create_test_app();
        app.open_new_form();
        type_text(&mut app, "Batch");
        app.form_next_field();
        type_text(&mut app, "5");
        app.form_prev_field();
        app.form_prev_field();
        app.form_prev_field();
        // Wrapped round to "Current Task"
        assert_eq!(app.form.as_ref().unwrap().editing_field, 3);
        type_text(&mut app, "2");
        app.submit_form(t0());

        let form = app.form.as_ref().unwrap();
        assert_eq!(
            form.error.as_deref(),
            Some("Average time must be positive for pre-filling previous tasks.")
        );
    }

    #[test]
    fn test_oversized_average_rejected() {
        let mut app = create_test_app();
        app.open_new_form();
        type_text(&mut app, "Batch");
        app.form_next_field();
        type_text(&mut app, "5");
        app.form_next_field();
        app.form_next_field();
        type_text(&mut app, "2");
        app.form_next_field();
        type_text(&mut app, "1e17");
        app.submit_form(t0());

        let form = app.form.as_ref().unwrap();
        assert_eq!(
            form.error.as_deref(),
            Some("Average time must be at most one year (31536000 seconds).")
        );
        assert!(app.current().is_none());
    }

    #[test]
    fn test_duplicate_name_reported_in_form() {
        let mut app = app_with_session("A", 3);
        app.open_new_form();
        type_text(&mut app, "A");
        app.form_next_field();
        type_text(&mut app, "2");
        app.submit_form(t0());

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Session with this name exists: A"));
    }

    #[test]
    fn test_edit_form_renames_and_resets_timer() {
        let mut app = app_with_session("A", 3);
        app.do_start(t0());
        app.do_task(secs(5));

        app.open_edit_form();
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.values(), vec!["A", "3", ""]);

        app.form_backspace();
        type_text(&mut app, "Renamed");
        app.submit_form(secs(6));

        let session = app.current().unwrap();
        assert_eq!(session.name, "Renamed");
        assert_eq!(session.tasks.len(), 1);
        assert_eq!(app.run_status(), RunStatus::Idle);
    }

    #[test]
    fn test_edit_form_needs_session() {
        let mut app = create_test_app();
        app.open_edit_form();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.form.is_none());
    }

    #[test]
    fn test_session_list_load_and_delete() {
        let mut app = app_with_session("A", 3);
        app.store
            .create(
                NewSession {
                    name: "B".to_string(),
                    item_count: 2,
                    deadline: None,
                    current_task: 1,
                    avg_time: None,
                },
                t0(),
            )
            .unwrap();

        app.open_session_list();
        let list = app.session_list.as_ref().unwrap();
        assert_eq!(list.names, vec!["A", "B"]);
        assert_eq!(list.selected, 1);

        app.list_move_up();
        app.list_load_selected();
        assert_eq!(app.store.current_name(), Some("A"));
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.open_session_list();
        app.list_confirm_delete(); // not confirmed yet
        assert_eq!(app.store.sessions().len(), 2);

        app.list_request_delete();
        app.list_confirm_delete();
        assert_eq!(app.store.current_name(), Some("B"));
        let list = app.session_list.as_ref().unwrap();
        assert_eq!(list.names, vec!["B"]);
        assert_eq!(list.selected, 0);
        assert!(!list.confirm_delete);
    }

    #[test]
    fn test_loading_stale_session_reports_it() {
        let mut app = app_with_session("A", 3);
        app.open_session_list();
        app.store.delete("A");
        app.list_load_selected();

        assert_eq!(app.status.as_deref(), Some("Session \"A\" does not exist anymore"));
        assert!(app.current().is_none());
    }

    #[test]
    fn test_chart_cycles() {
        let mut app = app_with_session("A", 3);
        assert!(app.chart_series().is_empty());

        app.do_start(t0());
        app.do_task(secs(5));
        assert_eq!(app.chart_series().values, vec![5.0]);

        app.cycle_view();
        app.cycle_metric();
        let options = app.chart_options();
        assert_eq!(options.view, ViewMode::Aggregate);
        assert_eq!(options.metric, Metric::TotalDuration);
        assert_eq!(app.chart_series().values, vec![5.0]);
    }

    #[test]
    fn test_chart_choice_saved_to_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        let store = SessionStore::open(Box::new(MemoryStorage::new()));
        let mut app = AppState::new(store, Settings::default(), Some(path.clone()), temp_dir.path().to_path_buf());

        app.cycle_granularity();
        let saved = crate::persistence::load_settings(&path).unwrap();
        assert_eq!(saved.chart, app.chart_options());
    }

    #[test]
    fn test_export_current() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = app_with_session("A", 3);
        app.export_dir = temp_dir.path().to_path_buf();
        app.do_start(t0());
        app.do_task(secs(5));

        app.export_current();
        let content = std::fs::read_to_string(temp_dir.path().join("A.csv")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(app.status.as_deref().unwrap().starts_with("Exported"));
    }
}

use crate::domain::Session;
use crate::error::SessionError;
use crate::persistence::StorageBackend;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Storage key for the session map
pub const SESSIONS_KEY: &str = "sessions";
/// Storage key for the last loaded session name
pub const LAST_SESSION_KEY: &str = "lastSession";

/// Validated input for a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub name: String,
    pub item_count: u32,
    pub deadline: Option<String>,
    /// Task the user is about to start (1 = from the beginning)
    pub current_task: u32,
    /// Seconds per task for the synthesized earlier tasks
    pub avg_time: Option<u64>,
}

/// Validated input for editing an existing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEdit {
    pub name: String,
    pub item_count: u32,
    pub deadline: Option<String>,
}

/// Pick the session to show: requested, then last loaded, then the first one.
pub fn resolve(
    sessions: &BTreeMap<String, Session>,
    requested: Option<&str>,
    last_loaded: Option<&str>,
) -> Option<String> {
    requested
        .filter(|name| sessions.contains_key(*name))
        .or_else(|| last_loaded.filter(|name| sessions.contains_key(*name)))
        .map(str::to_string)
        .or_else(|| sessions.keys().next().cloned())
}

/// Owns every session plus the "current session" pointer, and writes both
/// through to storage after each mutation.
pub struct SessionStore {
    storage: Box<dyn StorageBackend>,
    sessions: BTreeMap<String, Session>,
    current: Option<String>,
    last_storage_error: Option<String>,
}

impl SessionStore {
    /// Load sessions and the last loaded name from storage
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let sessions: BTreeMap<String, Session> = storage.get(SESSIONS_KEY, BTreeMap::new());
        let last: Option<String> = storage.get(LAST_SESSION_KEY, None);
        let current = resolve(&sessions, None, last.as_deref());
        info!(count = sessions.len(), current = ?current, "sessions loaded");

        Self {
            storage,
            sessions,
            current,
            last_storage_error: None,
        }
    }

    pub fn sessions(&self) -> &BTreeMap<String, Session> {
        &self.sessions
    }

    pub fn get(&self, name: &str) -> Option<&Session> {
        self.sessions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sessions.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_deref().and_then(|name| self.sessions.get(name))
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Most recent failed write, if not yet shown
    pub fn take_storage_error(&mut self) -> Option<String> {
        self.last_storage_error.take()
    }

    /// Mutate the current session in place and persist. None if there is no current session.
    pub fn update_current<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let name = self.current.clone()?;
        let session = self.sessions.get_mut(&name)?;
        let result = f(session);
        self.persist();
        Some(result)
    }

    /// Create a session (optionally backfilled) and make it current
    pub fn create(&mut self, new: NewSession, now: DateTime<Local>) -> Result<&Session, SessionError> {
        if self.sessions.contains_key(&new.name) {
            return Err(SessionError::DuplicateName(new.name));
        }

        let session = match new.avg_time {
            Some(avg) if new.current_task > 1 => Session::backfilled(
                new.name.clone(),
                new.item_count,
                new.deadline,
                new.current_task,
                avg,
                now,
            ),
            _ => Session::new(new.name.clone(), new.item_count, new.deadline),
        };
        info!(
            session = %session.name,
            items = session.item_count,
            backfilled = session.tasks.len(),
            "session created"
        );

        self.sessions.insert(new.name.clone(), session);
        self.set_current(Some(new.name.clone()));
        self.persist();
        self.sessions
            .get(&new.name)
            .ok_or(SessionError::StaleReference(new.name))
    }

    /// Rename and/or update a session, keeping its tasks and history
    pub fn edit(&mut self, name: &str, edit: SessionEdit) -> Result<&Session, SessionError> {
        if edit.name != name && self.sessions.contains_key(&edit.name) {
            return Err(SessionError::DuplicateName(edit.name));
        }
        let mut session = self
            .sessions
            .remove(name)
            .ok_or_else(|| SessionError::StaleReference(name.to_string()))?;

        session.name = edit.name.clone();
        session.item_count = edit.item_count;
        session.deadline = edit.deadline;
        if edit.name != name {
            info!(from = name, to = %edit.name, "session renamed");
        }

        self.sessions.insert(edit.name.clone(), session);
        self.set_current(Some(edit.name.clone()));
        self.persist();
        self.sessions
            .get(&edit.name)
            .ok_or(SessionError::StaleReference(edit.name))
    }

    /// Remove a session. If it was current, fall back to the first remaining one.
    pub fn delete(&mut self, name: &str) -> bool {
        if self.sessions.remove(name).is_none() {
            return false;
        }
        info!(session = name, "session deleted");

        if self.current.as_deref() == Some(name) {
            let fallback = resolve(&self.sessions, None, None);
            self.set_current(fallback);
        }
        self.persist();
        true
    }

    /// Make `name` current. A name that vanished falls back to another
    /// session and reports `StaleReference`.
    pub fn load(&mut self, name: &str) -> Result<(), SessionError> {
        let last = self.current.clone();
        let resolved = resolve(&self.sessions, Some(name), last.as_deref());
        self.set_current(resolved);
        self.persist();

        if self.current.as_deref() == Some(name) {
            info!(session = name, "session loaded");
            Ok(())
        } else {
            warn!(session = name, fallback = ?self.current, "requested session no longer exists");
            Err(SessionError::StaleReference(name.to_string()))
        }
    }

    fn set_current(&mut self, name: Option<String>) {
        self.current = name;
    }

    /// Write the full session map and the current name. Failures are
    /// remembered for the UI; memory stays authoritative.
    fn persist(&mut self) {
        let result = self
            .storage
            .set(SESSIONS_KEY, &self.sessions)
            .and_then(|_| self.storage.set(LAST_SESSION_KEY, &self.current));

        if let Err(e) = result {
            warn!(error = %e, "failed to persist sessions");
            self.last_storage_error = Some(format!("Could not save sessions: {}", e));
        }
    }
}

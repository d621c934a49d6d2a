use super::session::{Session, Task};

/// Maximum number of undo snapshots kept per session
pub const UNDO_LIMIT: usize = 100;

/// Push a snapshot, evicting the oldest entries beyond `UNDO_LIMIT`
fn push_bounded(stack: &mut Vec<Vec<Task>>, snapshot: Vec<Task>) {
    stack.push(snapshot);
    if stack.len() > UNDO_LIMIT {
        let excess = stack.len() - UNDO_LIMIT;
        stack.drain(..excess);
    }
}

impl Session {
    /// Append a finished task, snapshotting the prior list for undo.
    /// New forward progress invalidates the redo history.
    pub fn record_task(&mut self, task: Task) {
        let prior = self.tasks.clone();
        push_bounded(&mut self.undo, prior);
        self.tasks.push(task);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Restore the previous task list. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.tasks, previous);
        self.redo.push(current);
        true
    }

    /// Re-apply the last undone task list. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.tasks, next);
        push_bounded(&mut self.undo, current);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(time: u64) -> Task {
        Task {
            time,
            datetime: 1_725_890_700_000 + time as i64 * 1000,
        }
    }

    #[test]
    fn test_record_task_snapshots_prior_list() {
        let mut session = Session::new("A".to_string(), 5, None);
        session.record_task(task(5));

        assert_eq!(session.tasks, vec![task(5)]);
        assert_eq!(session.undo, vec![Vec::<Task>::new()]);
        assert!(session.redo.is_empty());
    }

    #[test]
    fn test_undo_then_redo_round_trip() {
        let mut session = Session::new("A".to_string(), 10, None);
        for t in 1..=4 {
            session.record_task(task(t));
        }
        let before = session.tasks.clone();

        assert!(session.undo());
        assert_eq!(session.tasks, before[..3].to_vec());
        assert_eq!(session.redo, vec![before.clone()]);

        assert!(session.redo());
        assert_eq!(session.tasks, before);
        assert!(session.redo.is_empty());
    }

    #[test]
    fn test_multiple_undos_redo_in_order() {
        let mut session = Session::new("A".to_string(), 10, None);
        for t in 1..=3 {
            session.record_task(task(t));
        }
        let full = session.tasks.clone();

        assert!(session.undo());
        assert!(session.undo());
        assert_eq!(session.tasks, vec![task(1)]);

        assert!(session.redo());
        assert_eq!(session.tasks, vec![task(1), task(2)]);
        assert!(session.redo());
        assert_eq!(session.tasks, full);
        assert!(!session.redo());
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut session = Session::new("A".to_string(), 3, None);
        assert!(!session.undo());
        assert!(!session.redo());
        assert!(session.tasks.is_empty());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn test_completion_clears_redo() {
        let mut session = Session::new("A".to_string(), 10, None);
        session.record_task(task(1));
        session.record_task(task(2));
        session.undo();
        assert!(session.can_redo());

        session.record_task(task(3));
        assert!(!session.can_redo());
        assert_eq!(session.tasks, vec![task(1), task(3)]);
    }

    #[test]
    fn test_undo_capped_oldest_evicted() {
        let mut session = Session::new("A".to_string(), 500, None);
        for t in 0..250 {
            session.record_task(task(t));
            assert!(session.undo.len() <= UNDO_LIMIT);
        }
        assert_eq!(session.undo.len(), UNDO_LIMIT);
        // Oldest surviving snapshot is the list before task 150 was added
        assert_eq!(session.undo[0].len(), 150);
        assert_eq!(session.undo.last().unwrap().len(), 249);
    }

    #[test]
    fn test_redo_respects_cap() {
        let mut session = Session::new("A".to_string(), 500, None);
        for t in 0..UNDO_LIMIT as u64 {
            session.record_task(task(t));
        }
        session.undo();
        session.undo();
        session.redo();
        session.redo();
        assert_eq!(session.undo.len(), UNDO_LIMIT);
    }

    #[test]
    fn test_round_trip_up_to_cap() {
        let mut session = Session::new("A".to_string(), 500, None);
        for t in 0..UNDO_LIMIT as u64 {
            session.record_task(task(t));
        }
        let full = session.tasks.clone();
        while session.undo() {}
        assert!(session.tasks.is_empty());
        while session.redo() {}
        assert_eq!(session.tasks, full);
    }
}

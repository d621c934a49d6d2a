use super::format::format_timestamp;
use crate::domain::Session;
use crate::persistence::atomic_write;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_HEADER: &str = "Task,Time Taken (s),Task DateTime";

/// One row per task: 1-based index, seconds, local completion time
pub fn render_csv(session: &Session) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (idx, task) in session.tasks.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{}\n",
            idx + 1,
            task.time,
            format_timestamp(task.datetime)
        ));
    }
    csv
}

/// `<name>.csv`, or `tasks.csv` for an unnamed session
pub fn export_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "tasks.csv".to_string()
    } else {
        format!("{}.csv", name)
    }
}

/// Write the session CSV into `dir` and return the file path
pub fn write_csv(session: &Session, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(&session.name));
    atomic_write(&path, &render_csv(session))?;
    info!(session = %session.name, path = %path.display(), rows = session.tasks.len(), "exported csv");
    Ok(path)
}

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DIR_NAME: &str = ".pacer";

/// Get the pacer directory - checks for local .pacer first, then falls back to global ~/.pacer
pub fn get_pacer_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_pacer(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .pacer directory by walking up the directory tree
fn find_local_pacer(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let pacer_dir = current.join(DIR_NAME);
        if pacer_dir.is_dir() {
            return Some(pacer_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the pacer directory exists
pub fn ensure_pacer_dir() -> Result<PathBuf> {
    let dir = get_pacer_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .pacer directory in the current directory
pub fn init_local_pacer() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let pacer_dir = current_dir.join(DIR_NAME);

    if pacer_dir.exists() {
        anyhow::bail!("Pacer directory already exists: {}", pacer_dir.display());
    }

    fs::create_dir_all(&pacer_dir)
        .with_context(|| format!("Failed to create directory: {}", pacer_dir.display()))?;

    Ok(pacer_dir)
}

/// Path to settings.json in the given data directory
pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

/// Path to the log file in the given data directory
pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("pacer.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return None if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

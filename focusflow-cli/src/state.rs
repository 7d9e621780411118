use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FOCUSFLOW_HOME`, else `~/.focusflow`.
pub fn focusflow_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FOCUSFLOW_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".focusflow"))
}

pub fn ensure_focusflow_home() -> Result<PathBuf> {
    let dir = focusflow_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_path() -> Result<PathBuf> {
    Ok(ensure_focusflow_home()?.join("tasks.json"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_focusflow_home()?.join("config.toml"))
}

//! Per-client session identity.
//!
//! The intent service keys its dialogue state on the session id, so every
//! installation gets its own generated id instead of a value shared by all
//! clients. The id persists across runs in the platform data directory and
//! can be rotated on demand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    session_id: String,
}

/// Load the persisted session id, generating and saving a fresh one on
/// first run or when `rotate` is set.
pub fn load_or_create(rotate: bool) -> Result<String> {
    load_or_create_at(&session_file_path()?, rotate)
}

fn load_or_create_at(path: &Path, rotate: bool) -> Result<String> {
    if !rotate && path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        let file: SessionFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

        return Ok(file.session_id);
    }

    let session_id = Uuid::new_v4().to_string();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create session directory: {}", parent.display())
        })?;
    }

    let toml = toml::to_string_pretty(&SessionFile { session_id: session_id.clone() })
        .context("Failed to serialize session file")?;

    fs::write(path, toml)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;

    Ok(session_id)
}

fn session_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot-cli")
        .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

    Ok(dirs.data_dir().join("session.toml"))
}

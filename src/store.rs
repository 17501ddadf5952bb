// src/store.rs
//! Tiny on-disk cache under `.store/`. The only thing persisted is the
//! anonymous telemetry id (the browser overlay kept it in localStorage).

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{DISTINCT_ID_FILE, STORE_DIR};

fn id_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(DISTINCT_ID_FILE)
}

/// Load the distinct id, generating and persisting one on first use.
/// Epoch millis as a string, same scheme the overlay used.
pub fn distinct_id() -> io::Result<String> {
    let p = id_path();
    if let Ok(existing) = fs::read_to_string(&p) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(e.to_string()))?
        .as_millis();
    let id = millis.to_string();

    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&p, &id)?;
    Ok(id)
}

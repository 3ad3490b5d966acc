use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Read a JSON document from `path`, falling back to `default` when the
/// file is missing or unusable. A missing file is the normal first-run
/// case and stays silent; a corrupt or unreadable one gets a warning.
pub fn load_or<T: DeserializeOwned>(path: &Path, default: T) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return default,
        Err(e) => {
            warn!("Failed to read {}: {}, starting from defaults", path.display(), e);
            return default;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Corrupt JSON in {}: {}, starting from defaults", path.display(), e);
            default
        }
    }
}

/// Serialize `value` as pretty-printed JSON and rewrite `path` wholesale.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

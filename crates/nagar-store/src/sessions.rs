use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Local;
use rand_core::{OsRng, RngCore};
use tracing::{error, info};

use nagar_types::models::SessionRecord;

use crate::persist;

pub const SESSIONS_FILE: &str = "sessions_db.json";

/// Persisted login sessions: one JSON object mapping opaque token to
/// `{username, created_at}`. Tokens carry no meaning and no expiry; they
/// live until an explicit logout removes them.
pub struct SessionStore {
    path: PathBuf,
    sessions: RwLock<BTreeMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SESSIONS_FILE);
        let sessions: BTreeMap<String, SessionRecord> = persist::load_or(&path, BTreeMap::new());
        info!("Session store loaded from {} ({} sessions)", path.display(), sessions.len());
        Self {
            path,
            sessions: RwLock::new(sessions),
        }
    }

    /// Issue a fresh token for `username` and persist the session.
    pub fn create(&self, username: &str) -> Result<String> {
        let token = generate_token();
        let record = SessionRecord {
            username: username.to_string(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        let mut sessions = self.write()?;
        sessions.insert(token.clone(), record);
        if let Err(e) = persist::save(&self.path, &*sessions) {
            error!("Failed to save session data: {}", e);
        }
        Ok(token)
    }

    pub fn lookup(&self, token: &str) -> Result<Option<SessionRecord>> {
        Ok(self.read()?.get(token).cloned())
    }

    /// Remove a token, reporting whether it existed. The file is only
    /// rewritten when something was actually removed.
    pub fn remove(&self, token: &str) -> Result<bool> {
        let mut sessions = self.write()?;
        if sessions.remove(token).is_none() {
            return Ok(false);
        }
        if let Err(e) = persist::save(&self.path, &*sessions) {
            error!("Failed to save session data: {}", e);
        }
        Ok(true)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, SessionRecord>>> {
        self.sessions
            .read()
            .map_err(|e| anyhow!("session store lock poisoned: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, SessionRecord>>> {
        self.sessions
            .write()
            .map_err(|e| anyhow!("session store lock poisoned: {}", e))
    }
}

/// 32 bytes of OS entropy as unpadded URL-safe base64 (43 characters).
/// Also used for the administrator's process-local handles, which never
/// pass through a `SessionStore`.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use tracing::{error, info};

use nagar_types::models::UserRecord;

use crate::persist;

pub const USERS_FILE: &str = "users_db.json";

/// Registered accounts, backed by a single JSON object mapping username to
/// record. The administrator never appears here.
pub struct UserStore {
    path: PathBuf,
    users: RwLock<BTreeMap<String, UserRecord>>,
}

impl UserStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(USERS_FILE);
        let users: BTreeMap<String, UserRecord> = persist::load_or(&path, BTreeMap::new());
        info!("User store loaded from {} ({} accounts)", path.display(), users.len());
        Self {
            path,
            users: RwLock::new(users),
        }
    }

    /// Exact, case-sensitive username lookup.
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(username))
    }

    /// Case-insensitive scan over stored email addresses.
    pub fn email_taken(&self, email: &str) -> Result<bool> {
        let needle = email.to_lowercase();
        Ok(self.read()?.values().any(|u| u.email.to_lowercase() == needle))
    }

    pub fn get(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.read()?.get(username).cloned())
    }

    /// Insert a freshly registered account and rewrite the backing file.
    /// A write failure is logged; the in-memory map stays authoritative.
    pub fn insert(&self, username: &str, record: UserRecord) -> Result<()> {
        let mut users = self.write()?;
        users.insert(username.to_string(), record);
        if let Err(e) = persist::save(&self.path, &*users) {
            error!("Failed to save user data: {}", e);
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, UserRecord>>> {
        self.users
            .read()
            .map_err(|e| anyhow!("user store lock poisoned: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, UserRecord>>> {
        self.users
            .write()
            .map_err(|e| anyhow!("user store lock poisoned: {}", e))
    }
}

use crate::models::UserProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// The session is process-wide shared state; every store holds a handle and
/// reads the token at operation time.
pub type SharedSession = Arc<Mutex<SessionStore>>;

pub fn lock(session: &SharedSession) -> MutexGuard<'_, SessionStore> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// On-disk layout. The profile is stored as a JSON string under `userData`,
/// so it can be corrupted independently of the rest of the file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(rename = "userRole", default)]
    user_role: Option<String>,
    #[serde(rename = "userData", default)]
    user_data: Option<String>,
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    token: Option<String>,
    user: Option<UserProfile>,
}

impl SessionStore {
    /// Loads the persisted session. A file holding data that cannot be
    /// parsed back into a usable token/user pair is removed outright and the
    /// session starts signed out.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            token: None,
            user: None,
        };
        store.restore();
        store
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    fn restore(&mut self) {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
            Err(err) => {
                warn!("Failed to read session file {}: {}", self.path.display(), err);
                return;
            }
        };

        let file: SessionFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(err) => {
                warn!("Session file is corrupt, clearing it: {}", err);
                self.wipe();
                return;
            }
        };

        // A valid session file always carries both halves of the pair.
        let Some(token) = file.token else {
            self.wipe();
            return;
        };
        let user = match file.user_data.as_deref().map(serde_json::from_str::<UserProfile>) {
            Some(Ok(user)) => user,
            _ => {
                warn!("Stored user data is missing or corrupt, clearing the session");
                self.wipe();
                return;
            }
        };

        debug!("Restored session for user {}", user.id);
        self.token = Some(token);
        self.user = Some(user);
    }

    pub fn persist(&mut self, token: String, user: UserProfile) -> Result<()> {
        self.token = Some(token);
        self.user = Some(user);
        self.write()
    }

    /// Replaces the stored profile while keeping the current token.
    pub fn update_user(&mut self, user: UserProfile) -> Result<()> {
        self.user = Some(user);
        self.write()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.wipe();
    }

    fn write(&self) -> Result<()> {
        let file = SessionFile {
            token: self.token.clone(),
            user_id: self.user.as_ref().map(|user| user.id.clone()),
            user_role: self.user.as_ref().map(|user| user.role.to_string()),
            user_data: self
                .user
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        };
        let serialized = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write session file {}", self.path.display()))
    }

    fn wipe(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove session file {}: {}", self.path.display(), err);
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Signed-in state is derived from token presence; there is no separate
    /// flag to fall out of sync.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

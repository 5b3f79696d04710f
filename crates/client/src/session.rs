use std::{fs, path::Path};

use api_types::auth::AuthUser;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Login session persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<AuthUser>,
}

impl Session {
    /// Reads the session at `path`.
    ///
    /// A missing file is an empty session. A corrupted file is discarded and also gives an empty
    /// session; only I/O failures are reported.
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Self>(&content) {
            Ok(session) if session.token.is_some() && session.user.is_none() => {
                warn!(path, "session without user discarded");
                Ok(Self::default())
            }
            Ok(session) => Ok(session),
            Err(err) => {
                warn!(path, "corrupted session discarded: {err}");
                Ok(Self::default())
            }
        }
    }

    /// Writes the session, or removes the file when logged out.
    pub fn save(&self, path: &str) -> Result<()> {
        if !self.is_authenticated() {
            return match fs::remove_file(path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }

        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

use std::{fs, io, path::Path};

use engine::AuthSession;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionFile {
    access: Option<String>,
    refresh: Option<String>,
}

/// Access token of the logged-in user, persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: String,
    tokens: SessionFile,
}

impl SessionStore {
    /// Reads the session file. A missing file is an empty session.
    pub fn load(path: &str) -> Result<Self> {
        let tokens = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => SessionFile::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path: path.to_string(),
            tokens,
        })
    }

    /// Stores the tokens issued at login.
    pub fn start(&mut self, access: String, refresh: Option<String>) -> Result<()> {
        self.tokens = SessionFile {
            access: Some(access),
            refresh,
        };
        self.save()
    }

    /// Forgets the tokens and removes the file.
    pub fn clear(&mut self) -> Result<()> {
        self.tokens = SessionFile::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.tokens)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl AuthSession for SessionStore {
    fn current_token(&self) -> Option<&str> {
        self.tokens.access.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use engine::{InitialView, initial_view};

    use super::*;

    fn temp_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("budget_tui_{}_{name}", std::process::id()));
        dir.join("session.json").display().to_string()
    }

    #[test]
    fn session_survives_reload_and_clears() {
        let path = temp_path("roundtrip");
        let mut session = SessionStore::load(&path).unwrap();
        assert_eq!(initial_view(&session), InitialView::Login);

        session
            .start("access-token".to_string(), Some("refresh-token".to_string()))
            .unwrap();
        let reloaded = SessionStore::load(&path).unwrap();
        assert_eq!(reloaded.current_token(), Some("access-token"));
        assert_eq!(reloaded.tokens.refresh.as_deref(), Some("refresh-token"));
        assert_eq!(initial_view(&reloaded), InitialView::Tracker);

        session.clear().unwrap();
        let cleared = SessionStore::load(&path).unwrap();
        assert_eq!(cleared.current_token(), None);
    }

    #[test]
    fn clearing_without_a_file_is_fine() {
        let mut session = SessionStore::load(&temp_path("absent")).unwrap();
        assert!(session.clear().is_ok());
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::paths::write_text_file;

/// Contents of `settings.json`. The password is kept in clear text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub owner_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordChange {
    pub current: String,
    pub next: String,
    pub confirm: String,
}

impl Settings {
    /// `None` when the file does not exist yet, i.e. first run.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        let settings = serde_json::from_str::<Settings>(raw.as_str())?;
        Ok(Some(settings))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self)?;
        write_text_file(path, content.as_str())
    }

    pub fn with_initial_password(password: &str) -> std::result::Result<Self, ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::EmptyInitialPassword);
        }
        Ok(Settings {
            owner_password: password.to_string(),
        })
    }

    pub fn verify(&self, candidate: &str) -> bool {
        candidate == self.owner_password
    }

    pub fn changed(&self, change: &PasswordChange) -> std::result::Result<Self, ValidationError> {
        if !self.verify(change.current.as_str()) {
            return Err(ValidationError::IncorrectCurrentPassword);
        }
        if change.next.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if change.next != change.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Settings {
            owner_password: change.next.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(current: &str, next: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            current: current.to_string(),
            next: next.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[test]
    fn first_run_has_no_settings() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path().join("settings.json").as_path()).unwrap(), None);
    }

    #[test]
    fn missing_password_key_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{}").unwrap();
        let settings = Settings::load(&path).unwrap().unwrap();
        assert_eq!(settings.owner_password, "");
    }

    #[test]
    fn saved_format_is_single_key_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::with_initial_password("hunter2").unwrap().save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"owner_password":"hunter2"}"#);
    }

    #[test]
    fn empty_initial_password_is_rejected() {
        assert_eq!(
            Settings::with_initial_password(""),
            Err(ValidationError::EmptyInitialPassword)
        );
    }

    #[test]
    fn verify_is_exact_match() {
        let settings = Settings::with_initial_password("Secret").unwrap();
        assert!(settings.verify("Secret"));
        assert!(!settings.verify("secret"));
        assert!(!settings.verify("Secret "));
    }

    #[test]
    fn change_checks_in_order() {
        let settings = Settings::with_initial_password("old").unwrap();
        assert_eq!(
            settings.changed(&change("wrong", "", "")),
            Err(ValidationError::IncorrectCurrentPassword)
        );
        assert_eq!(
            settings.changed(&change("old", "", "")),
            Err(ValidationError::EmptyPassword)
        );
        assert_eq!(
            settings.changed(&change("old", "new", "newer")),
            Err(ValidationError::PasswordMismatch)
        );
        let next = settings.changed(&change("old", "new", "new")).unwrap();
        assert_eq!(next.owner_password, "new");
    }
}

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::error::Result;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only text log of owner actions, one `[timestamp] message` line each.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    pub fn new(path: PathBuf) -> Self {
        ActionLog { path }
    }

    pub fn append(&self, message: &str) -> Result<()> {
        self.append_at(Local::now().naive_local(), message)
    }

    pub fn append_at(&self, at: NaiveDateTime, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())?;
        writeln!(file, "{}", format_line(at, message))?;
        Ok(())
    }

    pub fn read_all(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(self.path.as_path())?)
    }
}

pub fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn line_format() {
        assert_eq!(
            format_line(at(7, 5, 0), "Deleted Soap"),
            "[2024-03-09 07:05:00] Deleted Soap"
        );
    }

    #[test]
    fn appends_create_parent_and_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActionLog::new(dir.path().join("logs").join("inventory_log.txt"));
        assert_eq!(log.read_all().unwrap(), "");

        log.append_at(at(9, 0, 0), "Added Soap").unwrap();
        log.append_at(at(9, 0, 1), "Edited Soap").unwrap();
        assert_eq!(
            log.read_all().unwrap(),
            "[2024-03-09 09:00:00] Added Soap\n[2024-03-09 09:00:01] Edited Soap\n"
        );
    }
}

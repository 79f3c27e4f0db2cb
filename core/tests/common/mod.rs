//! Shared fixture for inventory session integration tests.

#![allow(dead_code)]

use inventory_core::{InventorySession, ItemForm, ItemId, StorePaths};
use tempfile::TempDir;

pub const OWNER_PASSWORD: &str = "owner-pass";

/// A session backed by a throwaway data directory.
pub struct TestStore {
    pub dir: TempDir,
    pub session: InventorySession,
}

impl TestStore {
    /// Fresh directory, owner password already set.
    pub fn new() -> Self {
        let mut store = Self::first_run();
        store
            .session
            .set_initial_password(OWNER_PASSWORD)
            .expect("set initial password");
        store
    }

    /// Fresh directory with no settings file.
    pub fn first_run() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let session = InventorySession::open(StorePaths::under(dir.path())).expect("open session");
        TestStore { dir, session }
    }

    /// Store with a few stocked items.
    pub fn with_sample_items() -> Self {
        let mut store = Self::new();
        store.add("Soap", "12.50", "10", "Hygiene");
        store.add("Rice", "45", "20", "Grocery");
        store.add("Shampoo", "99.99", "6", "Hygiene");
        store
    }

    pub fn paths(&self) -> StorePaths {
        StorePaths::under(self.dir.path())
    }

    /// Reopens the same directory as a new process would.
    pub fn reopen(&self) -> InventorySession {
        InventorySession::open(self.paths()).expect("reopen session")
    }

    pub fn add(&mut self, name: &str, price: &str, qty: &str, category: &str) -> ItemId {
        self.session
            .add(&ItemForm::new(name, price, qty, category))
            .expect("add item")
            .id
    }

    pub fn id_of(&self, name: &str) -> ItemId {
        self.session
            .rows()
            .into_iter()
            .find(|row| row.name == name)
            .map(|row| row.id)
            .expect("item present")
    }

    pub fn names(&self) -> Vec<String> {
        self.session.rows().into_iter().map(|row| row.name).collect()
    }

    /// Puts a directory where the action log lives so every append fails.
    pub fn block_action_log(&self) {
        let log_file = self.paths().log_file;
        if log_file.exists() {
            std::fs::remove_file(log_file.as_path()).expect("remove log file");
        }
        std::fs::create_dir_all(log_file.as_path()).expect("create blocking dir");
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.session
            .read_log()
            .expect("read log")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

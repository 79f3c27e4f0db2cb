//! Inventory, sales and owner settings for the Store Inventory Manager.
//!
//! Everything here is independent of the window: the desktop shell holds one
//! [`InventorySession`] and forwards each button press to it.

pub mod action_log;
pub mod error;
pub mod item;
pub mod paths;
pub mod report;
pub mod session;
pub mod settings;
pub mod store;

pub use action_log::ActionLog;
pub use error::{InventoryError, Result, ValidationError};
pub use item::{format_money, InventoryItem, ItemForm, ItemId, ItemRow, SoldRecord};
pub use paths::StorePaths;
pub use report::SalesTotal;
pub use session::{InventorySession, SaleOutcome, CURRENCY, LOW_STOCK_THRESHOLD};
pub use settings::{PasswordChange, Settings};
pub use store::InventoryData;

use std::collections::HashSet;

use serde::Serialize;

use crate::action_log::ActionLog;
use crate::error::{Result, ValidationError};
use crate::item::{format_money, InventoryItem, ItemForm, ItemId, ItemRow, SoldRecord};
use crate::paths::StorePaths;
use crate::report::{sales_totals, SalesTotal};
use crate::settings::{PasswordChange, Settings};
use crate::store::InventoryData;

/// Selling below this many remaining units raises a restock alert.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
pub const CURRENCY: &str = "₱";

#[derive(Debug, Clone)]
struct Entry {
    id: ItemId,
    item: InventoryItem,
}

/// Everything that goes into `inventory_data.json`, plus the id counter.
///
/// Mutations work on a copy that replaces the live ledger only after the log
/// line and the data file are both written.
#[derive(Debug, Clone)]
struct Ledger {
    entries: Vec<Entry>,
    income: f64,
    sold_items: Vec<SoldRecord>,
    next_id: u64,
}

impl Ledger {
    fn position(&self, id: ItemId) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| ValidationError::NoSelection.into())
    }

    fn push(&mut self, item: InventoryItem) -> ItemId {
        let id = ItemId::from_raw(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, item });
        id
    }

    fn to_data(&self) -> InventoryData {
        InventoryData {
            items: self.entries.iter().map(|entry| entry.item.clone()).collect(),
            income: self.income,
            sold_items: self.sold_items.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOutcome {
    pub name: String,
    pub sold: i64,
    pub earned: f64,
    pub remaining: i64,
    pub removed: bool,
    pub restock_alert: Option<String>,
}

/// The running application: in-memory inventory plus the files behind it.
///
/// Every successful mutation appends one line to the action log and rewrites
/// the whole data file. A rejected or failed request changes nothing in memory.
#[derive(Debug)]
pub struct InventorySession {
    paths: StorePaths,
    log: ActionLog,
    settings: Option<Settings>,
    ledger: Ledger,
    restock_reminders: HashSet<String>,
}

impl InventorySession {
    pub fn open(paths: StorePaths) -> Result<Self> {
        paths.ensure_dirs()?;
        let settings = Settings::load(paths.settings_file.as_path())?;
        let data = InventoryData::load(paths.data_file.as_path())?;
        log::info!(
            "opened inventory at {}: {} items, {} sales",
            paths.root.display(),
            data.items.len(),
            data.sold_items.len()
        );
        let mut ledger = Ledger {
            entries: Vec::with_capacity(data.items.len()),
            income: data.income,
            sold_items: data.sold_items,
            next_id: 1,
        };
        for item in data.items {
            ledger.push(item);
        }
        Ok(InventorySession {
            log: ActionLog::new(paths.log_file.clone()),
            paths,
            settings,
            ledger,
            restock_reminders: HashSet::new(),
        })
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn needs_password(&self) -> bool {
        self.settings.is_none()
    }

    pub fn set_initial_password(&mut self, password: &str) -> Result<()> {
        if self.settings.is_some() {
            return Err(ValidationError::PasswordAlreadySet.into());
        }
        let settings = Settings::with_initial_password(password)?;
        settings.save(self.paths.settings_file.as_path())?;
        self.settings = Some(settings);
        log::info!("owner password created");
        Ok(())
    }

    pub fn rows(&self) -> Vec<ItemRow> {
        self.ledger
            .entries
            .iter()
            .map(|entry| ItemRow::new(entry.id, &entry.item))
            .collect()
    }

    /// Case-insensitive substring match on the item name.
    pub fn search(&self, query: &str) -> Vec<ItemRow> {
        let keyword = query.trim().to_lowercase();
        self.ledger
            .entries
            .iter()
            .filter(|entry| entry.item.name.to_lowercase().contains(keyword.as_str()))
            .map(|entry| ItemRow::new(entry.id, &entry.item))
            .collect()
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.ledger
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.item)
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.ledger
            .entries
            .iter()
            .map(|entry| entry.item.clone())
            .collect()
    }

    pub fn income(&self) -> f64 {
        self.ledger.income
    }

    pub fn income_label(&self) -> String {
        format!("Total Income: {CURRENCY}{}", format_money(self.ledger.income))
    }

    pub fn sold_items(&self) -> &[SoldRecord] {
        self.ledger.sold_items.as_slice()
    }

    pub fn add(&mut self, form: &ItemForm) -> Result<ItemRow> {
        let item = form.to_new_item()?;
        // Debug formatting keeps the trailing ".0" on whole prices.
        let message = format!(
            "Added {}, Price: {CURRENCY}{:?}, Qty: {}, Category: {}",
            item.name, item.price, item.qty, item.category
        );
        let row_item = item.clone();
        let mut next = self.ledger.clone();
        let id = next.push(item);
        self.commit(next, message.as_str())?;
        Ok(ItemRow::new(id, &row_item))
    }

    pub fn edit(&mut self, id: ItemId, form: &ItemForm) -> Result<ItemRow> {
        let pos = self.ledger.position(id)?;
        let item = form.to_edited_item()?;
        let message = format!("Edited {}", item.name);
        let row = ItemRow::new(id, &item);
        let mut next = self.ledger.clone();
        next.entries[pos].item = item;
        self.commit(next, message.as_str())?;
        Ok(row)
    }

    pub fn delete(&mut self, id: ItemId) -> Result<InventoryItem> {
        let pos = self.ledger.position(id)?;
        let mut next = self.ledger.clone();
        let entry = next.entries.remove(pos);
        self.commit(next, format!("Deleted {}", entry.item.name).as_str())?;
        Ok(entry.item)
    }

    pub fn sell(&mut self, id: ItemId, quantity: &str) -> Result<SaleOutcome> {
        let pos = self.ledger.position(id)?;
        let Ok(qty_to_sell) = quantity.trim().parse::<i64>() else {
            return Err(ValidationError::InvalidSellInput.into());
        };
        let current = &self.ledger.entries[pos].item;
        if qty_to_sell <= 0 || qty_to_sell > current.qty {
            return Err(ValidationError::InvalidSellQuantity.into());
        }

        let mut next = self.ledger.clone();
        let item = &mut next.entries[pos].item;
        item.qty -= qty_to_sell;
        let earned = item.price * qty_to_sell as f64;
        let name = item.name.clone();
        let remaining = item.qty;
        next.income += earned;
        next.sold_items.push(SoldRecord {
            name: name.clone(),
            qty: qty_to_sell,
        });
        let removed = remaining == 0;
        if removed {
            next.entries.remove(pos);
        }
        let message = format!(
            "Sold {qty_to_sell} of {name} - Earned: {CURRENCY}{}",
            format_money(earned)
        );
        self.commit(next, message.as_str())?;

        let restock_alert = if remaining < LOW_STOCK_THRESHOLD
            && self.restock_reminders.insert(name.clone())
        {
            log::info!("{name} is low on stock ({remaining} left)");
            Some(format!("{name} is low on stock!"))
        } else {
            None
        };

        Ok(SaleOutcome {
            name,
            sold: qty_to_sell,
            earned,
            remaining,
            removed,
            restock_alert,
        })
    }

    pub fn reset_income(&mut self, password: &str) -> Result<()> {
        if !self.verify_owner(password) {
            log::warn!("income reset refused: wrong password");
            return Err(ValidationError::IncorrectPassword.into());
        }
        let mut next = self.ledger.clone();
        next.income = 0.0;
        self.commit(next, "Total income has been reset by owner.")
    }

    pub fn change_password(&mut self, change: &PasswordChange) -> Result<()> {
        let Some(current) = self.settings.as_ref() else {
            return Err(ValidationError::IncorrectCurrentPassword.into());
        };
        let next = current.changed(change)?;
        self.log.append("Owner password was changed.")?;
        next.save(self.paths.settings_file.as_path())?;
        self.settings = Some(next);
        Ok(())
    }

    pub fn sales_report(&self) -> Result<Vec<SalesTotal>> {
        if self.ledger.sold_items.is_empty() {
            return Err(ValidationError::NoSales.into());
        }
        Ok(sales_totals(self.ledger.sold_items.as_slice()))
    }

    pub fn read_log(&self) -> Result<String> {
        self.log.read_all()
    }

    pub fn snapshot(&self) -> InventoryData {
        self.ledger.to_data()
    }

    pub fn verify_owner(&self, password: &str) -> bool {
        self.settings
            .as_ref()
            .is_some_and(|settings| settings.verify(password))
    }

    // Log, then save, then swap in. Any failure leaves the live ledger as it was.
    fn commit(&mut self, next: Ledger, message: &str) -> Result<()> {
        self.log.append(message)?;
        next.to_data().save(self.paths.data_file.as_path())?;
        self.ledger = next;
        Ok(())
    }
}

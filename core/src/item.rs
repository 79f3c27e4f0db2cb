use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub price: f64,
    pub qty: i64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoldRecord {
    pub name: String,
    pub qty: i64,
}

/// In-memory key of an item. Assigned on load or add, never written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn from_raw(raw: u64) -> Self {
        ItemId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Raw text of the four entry fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub qty: String,
    #[serde(default)]
    pub category: String,
}

impl ItemForm {
    pub fn new(name: &str, price: &str, qty: &str, category: &str) -> Self {
        ItemForm {
            name: name.to_string(),
            price: price.to_string(),
            qty: qty.to_string(),
            category: category.to_string(),
        }
    }

    pub fn to_new_item(&self) -> Result<InventoryItem, ValidationError> {
        self.build(ValidationError::InvalidNumbers)
    }

    /// Same checks as [`ItemForm::to_new_item`], so an edit with a blank name
    /// or category is refused with "Fill all fields". Only the numeric error
    /// message differs.
    pub fn to_edited_item(&self) -> Result<InventoryItem, ValidationError> {
        self.build(ValidationError::InvalidEditInput)
    }

    // Numbers are checked before the required text fields.
    fn build(&self, numeric_error: ValidationError) -> Result<InventoryItem, ValidationError> {
        let Some(price) = parse_price(self.price.as_str()) else {
            return Err(numeric_error);
        };
        let Some(qty) = parse_quantity(self.qty.as_str()) else {
            return Err(numeric_error);
        };
        let name = self.name.trim();
        let category = self.category.trim();
        if name.is_empty() || category.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(InventoryItem {
            name: name.to_string(),
            price,
            qty,
            category: category.to_string(),
        })
    }
}

// Negative values are accepted. NaN and infinity are not, since they cannot
// be written back as JSON numbers.
fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|price| price.is_finite())
}

fn parse_quantity(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// One line of the table as the window shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub qty: i64,
    pub category: String,
}

impl ItemRow {
    pub fn new(id: ItemId, item: &InventoryItem) -> Self {
        ItemRow {
            id,
            name: item.name.clone(),
            price: format_money(item.price),
            qty: item.qty,
            category: item.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_trims_and_parses() {
        let form = ItemForm::new("  Soap ", " 12.5 ", " 3", " Hygiene ");
        let item = form.to_new_item().unwrap();
        assert_eq!(item.name, "Soap");
        assert_eq!(item.price, 12.5);
        assert_eq!(item.qty, 3);
        assert_eq!(item.category, "Hygiene");
    }

    #[test]
    fn numbers_are_checked_before_required_fields() {
        let form = ItemForm::new("", "abc", "1", "");
        assert_eq!(form.to_new_item(), Err(ValidationError::InvalidNumbers));
        assert_eq!(form.to_edited_item(), Err(ValidationError::InvalidEditInput));
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let form = ItemForm::new("Rice", "40", "1.5", "Grocery");
        assert_eq!(form.to_new_item(), Err(ValidationError::InvalidNumbers));
    }

    #[test]
    fn non_finite_price_is_rejected() {
        for price in ["NaN", "inf", "-inf"] {
            let form = ItemForm::new("Rice", price, "1", "Grocery");
            assert_eq!(form.to_new_item(), Err(ValidationError::InvalidNumbers));
        }
    }

    #[test]
    fn negative_numbers_are_accepted() {
        let item = ItemForm::new("Refund", "-2.5", "-1", "Misc").to_new_item().unwrap();
        assert_eq!(item.price, -2.5);
        assert_eq!(item.qty, -1);
    }

    #[test]
    fn edit_with_blank_name_is_missing_field() {
        let form = ItemForm::new("  ", "40", "2", "Grocery");
        assert_eq!(form.to_edited_item(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn blank_category_is_missing_field() {
        let form = ItemForm::new("Rice", "40", "2", "   ");
        assert_eq!(form.to_new_item(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn row_formats_price_with_two_decimals() {
        let item = InventoryItem {
            name: "Pen".to_string(),
            price: 7.0,
            qty: 10,
            category: "Office".to_string(),
        };
        let row = ItemRow::new(ItemId::from_raw(4), &item);
        assert_eq!(row.price, "7.00");
        assert_eq!(row.id.get(), 4);
    }
}

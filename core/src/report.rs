use std::collections::HashMap;

use serde::Serialize;

use crate::item::SoldRecord;

pub const CHART_TITLE: &str = "Sold Item Report (All Sold Items)";
pub const CHART_X_LABEL: &str = "Item Names";
pub const CHART_Y_LABEL: &str = "Total Sold Units";
pub const SALES_CSV_FILENAME: &str = "sales_report.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesTotal {
    pub name: String,
    pub qty: i64,
}

/// Units sold per item name, largest first. Ties keep first-sold order.
pub fn sales_totals(sold: &[SoldRecord]) -> Vec<SalesTotal> {
    let mut totals: Vec<SalesTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in sold {
        match index.get(record.name.as_str()) {
            Some(&pos) => totals[pos].qty += record.qty,
            None => {
                index.insert(record.name.as_str(), totals.len());
                totals.push(SalesTotal {
                    name: record.name.clone(),
                    qty: record.qty,
                });
            }
        }
    }
    totals.sort_by(|a, b| b.qty.cmp(&a.qty));
    totals
}

pub fn sales_csv(totals: &[SalesTotal]) -> String {
    let mut lines = vec!["name,qty".to_string()];
    for total in totals {
        lines.push(format!("{},{}", csv_escape(total.name.as_str()), total.qty));
    }
    lines.join("\n")
}

fn should_neutralize_csv(value: &str) -> bool {
    let trimmed = value.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('\'') {
        return false;
    }
    matches!(
        trimmed.chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    )
}

fn csv_escape(value: &str) -> String {
    let safe = if should_neutralize_csv(value) {
        format!("'{value}")
    } else {
        value.to_string()
    };
    if safe.contains(',') || safe.contains('"') || safe.contains('\n') || safe.contains('\r') {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}

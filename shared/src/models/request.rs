//! Item Request Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request lifecycle status
///
/// Only `Pending` is ever assigned; approve/reject transitions do not exist yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub qty: u32,
}

/// Item request entity, owned by the account whose email it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    pub date: NaiveDate,
    pub employee_email: String,
}

/// One editable row of the request form, kept as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub name: String,
    pub qty: String,
}

impl Default for ItemRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            qty: "1".to_string(),
        }
    }
}

impl ItemRow {
    pub fn new(name: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: qty.into(),
        }
    }

    /// Quantity as a positive integer; anything unparsable or zero counts as 1
    pub fn quantity(&self) -> u32 {
        match self.qty.trim().parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => 1,
        }
    }
}

/// New-request form with a user-extensible list of item rows
///
/// The form always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestForm {
    #[serde(rename = "type")]
    pub kind: String,
    rows: Vec<ItemRow>,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new("")
    }
}

impl RequestForm {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            rows: vec![ItemRow::default()],
        }
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut ItemRow> {
        self.rows.get_mut(index)
    }

    /// Append an empty row (quantity 1) and return its index
    pub fn add_row(&mut self) -> usize {
        self.rows.push(ItemRow::default());
        self.rows.len() - 1
    }

    /// Append a filled row and return its index
    pub fn push_row(&mut self, row: ItemRow) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Remove a row. The last remaining row is never removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Back to a single empty row, keeping the selected type
    pub fn reset(&mut self) {
        self.rows = vec![ItemRow::default()];
    }

    /// Items with a non-empty (trimmed) name, in row order
    pub fn items(&self) -> Vec<RequestItem> {
        self.rows
            .iter()
            .filter_map(|row| {
                let name = row.name.trim();
                (!name.is_empty()).then(|| RequestItem {
                    name: name.to_string(),
                    qty: row.quantity(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_starts_with_one_row() {
        let form = RequestForm::new("Equipment");
        assert_eq!(form.rows().len(), 1);
        assert_eq!(form.rows()[0].qty, "1");
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut form = RequestForm::new("Equipment");
        assert!(!form.remove_row(0));
        let idx = form.add_row();
        assert_eq!(idx, 1);
        assert!(form.remove_row(0));
        assert_eq!(form.rows().len(), 1);
        assert!(!form.remove_row(5));
    }

    #[test]
    fn test_items_skip_blank_names_and_default_qty() {
        let mut form = RequestForm::new("Supplies");
        form.row_mut(0).unwrap().name = "  Laptop ".into();
        form.push_row(ItemRow::new("", "4"));
        form.push_row(ItemRow::new("Mouse", "abc"));
        form.push_row(ItemRow::new("Cable", "0"));
        form.push_row(ItemRow::new("Chair", "3"));

        let items = form.items();
        assert_eq!(
            items,
            vec![
                RequestItem { name: "Laptop".into(), qty: 1 },
                RequestItem { name: "Mouse".into(), qty: 1 },
                RequestItem { name: "Cable".into(), qty: 1 },
                RequestItem { name: "Chair".into(), qty: 3 },
            ]
        );
    }

    #[test]
    fn test_negative_quantity_becomes_one() {
        assert_eq!(ItemRow::new("x", "-3").quantity(), 1);
        assert_eq!(ItemRow::new("x", " 12 ").quantity(), 12);
    }

    #[test]
    fn test_reset_keeps_type() {
        let mut form = RequestForm::new("Leave");
        form.push_row(ItemRow::new("Day off", "2"));
        form.reset();
        assert_eq!(form.kind, "Leave");
        assert_eq!(form.rows(), &[ItemRow::default()]);
    }

    #[test]
    fn test_request_json_uses_type_key() {
        let req = Request {
            id: 1,
            kind: "Equipment".into(),
            items: vec![RequestItem { name: "Laptop".into(), qty: 1 }],
            status: RequestStatus::Pending,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            employee_email: "ada@example.com".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "Equipment");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["employeeEmail"], "ada@example.com");
    }
}

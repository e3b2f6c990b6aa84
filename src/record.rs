//! Schema-free invoice data.
//!
//! An [InvoiceRecord] is a plain map from field name to value. Nothing is validated:
//! lookups for absent fields return the default the caller asks for, and values of an
//! unexpected shape are shown through their [Display](std::fmt::Display) form.

use std::collections::BTreeMap;
use std::fmt;

/// One row of an item table: display strings in column order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineItem(pub Vec<String>);

impl LineItem {
    /// The value of column `index`, or `""` when the item is shorter than that
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

impl<S: ToString, const N: usize> From<[S; N]> for LineItem {
    fn from(cells: [S; N]) -> Self {
        LineItem(cells.iter().map(ToString::to_string).collect())
    }
}

impl<S: ToString> From<Vec<S>> for LineItem {
    fn from(cells: Vec<S>) -> Self {
        LineItem(cells.iter().map(ToString::to_string).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Items(Vec<LineItem>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Items(items) => {
                let rows: Vec<String> = items.iter().map(|item| item.0.join(", ")).collect();
                write!(f, "[{}]", rows.join("; "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<f64> for FieldValue {
    fn from(number: f64) -> Self {
        FieldValue::Number(number)
    }
}

impl From<Vec<LineItem>> for FieldValue {
    fn from(items: Vec<LineItem>) -> Self {
        FieldValue::Items(items)
    }
}

/// Field name to value mapping for one invoice
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InvoiceRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl InvoiceRecord {
    pub fn new() -> InvoiceRecord {
        InvoiceRecord::default()
    }

    /// Builder-style [InvoiceRecord::insert]
    pub fn with<K: Into<String>, V: Into<FieldValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<FieldValue>>(&mut self, key: K, value: V) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// The display string of `key`, or `""` if it is absent
    pub fn text(&self, key: &str) -> String {
        self.text_or(key, "")
    }

    /// The display string of `key`, or `default` if it is absent
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.fields.get(key) {
            Some(value) => value.to_string(),
            None => default.to_string(),
        }
    }

    /// The line items stored under `key`; empty if absent or not a list
    pub fn items(&self, key: &str) -> &[LineItem] {
        match self.fields.get(key) {
            Some(FieldValue::Items(items)) => items,
            _ => &[],
        }
    }
}

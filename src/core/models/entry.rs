use super::money::Money;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Expense => write!(f, "expense"),
            EntryKind::Income => write!(f, "income"),
        }
    }
}

/// A personal expense or income record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: Money,
    pub category_id: String,
    #[serde(default)]
    pub note: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: Money,
    pub category_id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Category id -> monthly limit.
pub type Budgets = IndexMap<String, Money>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category_id: String,
    pub amount: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DaySection {
    pub date: chrono::NaiveDate,
    pub entries: Vec<Entry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BudgetLine {
    pub category_id: String,
    pub spent: Money,
    pub budget: Money,
    /// Percent of the budget used, capped at 100.
    pub progress: rust_decimal::Decimal,
    pub over_budget: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BudgetReport {
    pub year: i32,
    pub month: u32,
    pub lines: Vec<BudgetLine>,
    pub total_budget: Money,
    pub total_spent: Money,
}

/// Income, spending and category breakdown for one month.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStatistics {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expense: Money,
    /// Income minus expense.
    pub net: Money,
    pub category_totals: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub daily_average: Money,
}

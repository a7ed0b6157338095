use super::entry::EntryKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Category {
    pub fn new(id: &str, name: &str, kind: EntryKind) -> Self {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

const DEFAULT_EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("food", "Food & Dining"),
    ("transport", "Transport"),
    ("shopping", "Shopping"),
    ("entertainment", "Entertainment"),
    ("bills", "Bills & Utilities"),
    ("health", "Health"),
    ("education", "Education"),
    ("other", "Other"),
];

const DEFAULT_INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("salary", "Salary"),
    ("freelance", "Freelance"),
    ("investment", "Investment"),
    ("gift", "Gift"),
    ("other_income", "Other Income"),
];

/// Built-in categories of one kind, used until the user saves their own.
pub fn default_categories(kind: EntryKind) -> Vec<Category> {
    let table = match kind {
        EntryKind::Expense => DEFAULT_EXPENSE_CATEGORIES,
        EntryKind::Income => DEFAULT_INCOME_CATEGORIES,
    };
    table.iter().map(|(id, name)| Category::new(id, name, kind)).collect()
}

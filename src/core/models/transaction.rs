use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// The owner gave money to the person; the person owes the owner.
    Give,
    /// The owner received money from the person; the owner owes the person.
    Got,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionKind::Give => "give",
            TransactionKind::Got => "got",
        };
        write!(f, "{}", s)
    }
}

/// One leg of the owner's running account with a single person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SingleTransaction {
    pub id: String,
    pub person_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    #[serde(default)]
    pub note: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewSingleTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

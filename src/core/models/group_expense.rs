use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One outlay paid in full by `paid_by` on behalf of the whole group.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupExpense {
    pub id: String,
    pub group_id: String,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewGroupExpense {
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

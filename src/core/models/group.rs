use super::money::Money;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Unique person ids, in display order.
    pub member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn is_member(&self, person_id: &str) -> bool {
        self.member_ids.iter().any(|m| m == person_id)
    }

    /// Appends ids that are not already members, keeping existing order.
    /// Returns the ids actually added.
    pub fn add_members(&mut self, person_ids: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for person_id in person_ids {
            if !self.is_member(person_id) {
                self.member_ids.push(person_id.clone());
                added.push(person_id.clone());
            }
        }
        added
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub member_ids: Vec<String>,
}

/// Person id -> signed balance, in member order.
pub type Balances = IndexMap<String, Money>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupStats {
    pub total_expense: Money,
    pub fair_share: Money,
    pub balances: Balances,
    pub member_count: usize,
}

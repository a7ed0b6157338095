mod service_tests;

use crate::core::models::{
    Balances, Entry, EntryKind, Group, GroupExpense, Money, Person, SingleTransaction, TransactionKind,
};
use crate::core::services::LedgerService;
use crate::infrastructure::logging::in_memory::InMemoryActivityLog;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use chrono::{DateTime, TimeZone, Utc};

pub fn create_test_service() -> LedgerService<InMemoryStore, InMemoryActivityLog> {
    LedgerService::new(InMemoryStore::new(), InMemoryActivityLog::new())
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn person(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        phone: None,
        created_at: at(2026, 1, 1, 0),
    }
}

pub fn group(id: &str, members: &[&str]) -> Group {
    Group {
        id: id.to_string(),
        name: format!("Group {}", id),
        member_ids: members.iter().map(|m| m.to_string()).collect(),
        created_at: at(2026, 1, 1, 0),
    }
}

pub fn group_expense(group_id: &str, paid_by: &str, amount: Money) -> GroupExpense {
    GroupExpense {
        id: uuid::Uuid::new_v4().to_string(),
        group_id: group_id.to_string(),
        description: String::new(),
        amount,
        paid_by: paid_by.to_string(),
        date: at(2026, 1, 2, 0),
        created_at: at(2026, 1, 2, 0),
    }
}

pub fn single(person_id: &str, kind: TransactionKind, amount: Money) -> SingleTransaction {
    SingleTransaction {
        id: uuid::Uuid::new_v4().to_string(),
        person_id: person_id.to_string(),
        kind,
        amount,
        note: String::new(),
        date: at(2026, 1, 2, 0),
        created_at: at(2026, 1, 2, 0),
    }
}

pub fn entry(kind: EntryKind, category_id: &str, amount: Money, date: DateTime<Utc>) -> Entry {
    Entry {
        id: uuid::Uuid::new_v4().to_string(),
        kind,
        amount,
        category_id: category_id.to_string(),
        note: String::new(),
        date,
        created_at: date,
    }
}

pub fn balances(pairs: &[(&str, Money)]) -> Balances {
    pairs.iter().map(|(id, amount)| (id.to_string(), *amount)).collect()
}

use super::create_test_service;
use crate::core::constants::{GROUP_CREATED, GROUP_MEMBERS_ADDED, GROUPS_KEY, PERSON_ADDED, PERSON_DELETED};
use crate::core::errors::LedgerError;
use crate::core::models::{
    Category, EntryKind, Money, NewEntry, NewGroup, NewGroupExpense, NewPerson, NewSingleTransaction, TransactionKind,
};
use crate::core::services::LedgerService;
use crate::infrastructure::logging::in_memory::InMemoryActivityLog;
use crate::infrastructure::storage::KeyValueStore;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn new_person(name: &str) -> NewPerson {
    NewPerson {
        name: name.to_string(),
        phone: None,
    }
}

fn new_expense(paid_by: &str, amount: i64) -> NewGroupExpense {
    NewGroupExpense {
        description: "Dinner".to_string(),
        amount: Money::from_major(amount),
        paid_by: paid_by.to_string(),
        date: None,
    }
}

fn new_transaction(kind: TransactionKind, amount: i64) -> NewSingleTransaction {
    NewSingleTransaction {
        kind,
        amount: Money::from_major(amount),
        note: String::new(),
        date: None,
    }
}

#[tokio::test]
async fn test_add_and_list_people() {
    let service = create_test_service();

    let asha = service.add_person(new_person("  Asha ")).await.unwrap();
    service.add_person(new_person("Bilal")).await.unwrap();

    assert_eq!(asha.name, "Asha");
    let people = service.list_people().await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(service.get_person(&asha.id).await.unwrap(), asha);

    let logs = service.activity().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action, PERSON_ADDED);
}

#[tokio::test]
async fn test_add_person_requires_name() {
    let service = create_test_service();

    let result = service.add_person(new_person("   ")).await;

    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "name"));
}

#[tokio::test]
async fn test_person_balance_through_service() {
    let service = create_test_service();
    let p = service.add_person(new_person("Asha")).await.unwrap();

    service
        .add_single_transaction(&p.id, new_transaction(TransactionKind::Give, 500))
        .await
        .unwrap();
    service
        .add_single_transaction(&p.id, new_transaction(TransactionKind::Got, 200))
        .await
        .unwrap();
    service
        .add_single_transaction(&p.id, new_transaction(TransactionKind::Give, 100))
        .await
        .unwrap();

    assert_eq!(service.person_balance(&p.id).await.unwrap(), Money::from_major(400));
    assert_eq!(service.person_balance("missing").await.unwrap(), Money::ZERO);
}

#[tokio::test]
async fn test_transaction_validation() {
    let service = create_test_service();
    let p = service.add_person(new_person("Asha")).await.unwrap();

    let zero = service
        .add_single_transaction(&p.id, new_transaction(TransactionKind::Give, 0))
        .await;
    assert!(matches!(zero, Err(LedgerError::InvalidInput(_, _))));

    let fractional = service
        .add_single_transaction(
            &p.id,
            NewSingleTransaction {
                kind: TransactionKind::Give,
                amount: Money::new(dec!(1.005)),
                note: String::new(),
                date: None,
            },
        )
        .await;
    assert!(matches!(fractional, Err(LedgerError::InvalidInput(_, _))));

    let unknown = service
        .add_single_transaction("nobody", new_transaction(TransactionKind::Give, 5))
        .await;
    assert!(matches!(unknown, Err(LedgerError::PersonNotFound(_))));
}

#[tokio::test]
async fn test_delete_single_transaction() {
    let service = create_test_service();
    let p = service.add_person(new_person("Asha")).await.unwrap();
    let tx = service
        .add_single_transaction(&p.id, new_transaction(TransactionKind::Give, 40))
        .await
        .unwrap();

    service.delete_single_transaction(&tx.id).await.unwrap();

    assert_eq!(service.person_balance(&p.id).await.unwrap(), Money::ZERO);
    let again = service.delete_single_transaction(&tx.id).await;
    assert!(matches!(again, Err(LedgerError::TransactionNotFound(_))));
}

#[tokio::test]
async fn test_group_settlements_end_to_end() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let c = service.add_person(new_person("Chen")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Trip".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone(), c.id.clone()],
        })
        .await
        .unwrap();

    service.add_group_expense(&group.id, new_expense(&a.id, 300)).await.unwrap();

    let stats = service.group_stats(&group.id).await.unwrap();
    assert_eq!(stats.fair_share, Money::from_major(100));
    assert_eq!(stats.balances[&a.id], Money::from_major(200));

    let settlements = service.group_settlements(&group.id).await.unwrap();
    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0].from, b.id);
    assert_eq!(settlements[0].from_name, "Bilal");
    assert_eq!(settlements[0].to, a.id);
    assert_eq!(settlements[1].from, c.id);
    let moved: Money = settlements.iter().map(|s| s.amount).sum();
    assert_eq!(moved, Money::from_major(200));
}

#[tokio::test]
async fn test_add_group_validation() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();

    let lonely = service
        .add_group(NewGroup {
            name: "Solo".to_string(),
            member_ids: vec![a.id.clone()],
        })
        .await;
    assert!(matches!(
        lonely,
        Err(LedgerError::NotEnoughMembers { required: 2, actual: 1 })
    ));

    let duplicate = service
        .add_group(NewGroup {
            name: "Twice".to_string(),
            member_ids: vec![a.id.clone(), a.id.clone()],
        })
        .await;
    assert!(matches!(duplicate, Err(LedgerError::DuplicateMember(_))));

    let stranger = service
        .add_group(NewGroup {
            name: "Strangers".to_string(),
            member_ids: vec![a.id.clone(), "nobody".to_string()],
        })
        .await;
    assert!(matches!(stranger, Err(LedgerError::PersonNotFound(id)) if id == "nobody"));

    let ok = service
        .add_group(NewGroup {
            name: "Pair".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await;
    assert!(ok.is_ok());
    let logs = service.activity().await.unwrap();
    assert_eq!(logs.last().unwrap().action, GROUP_CREATED);
}

#[tokio::test]
async fn test_group_expense_payer_must_be_member() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let c = service.add_person(new_person("Chen")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Pair".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await
        .unwrap();

    let result = service.add_group_expense(&group.id, new_expense(&c.id, 10)).await;
    assert!(matches!(result, Err(LedgerError::PayerNotInGroup(_))));

    let missing = service.add_group_expense("nope", new_expense(&a.id, 10)).await;
    assert!(matches!(missing, Err(LedgerError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_delete_group_cascades_expenses() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Pair".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await
        .unwrap();
    let expense = service.add_group_expense(&group.id, new_expense(&a.id, 10)).await.unwrap();

    service.delete_group(&group.id).await.unwrap();

    assert!(service.list_groups().await.unwrap().is_empty());
    let gone = service.delete_group_expense(&expense.id).await;
    assert!(matches!(gone, Err(LedgerError::GroupExpenseNotFound(_))));
}

#[tokio::test]
async fn test_delete_person_cascades() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let c = service.add_person(new_person("Chen")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Trip".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone(), c.id.clone()],
        })
        .await
        .unwrap();
    service
        .add_single_transaction(&c.id, new_transaction(TransactionKind::Give, 70))
        .await
        .unwrap();
    service.add_group_expense(&group.id, new_expense(&c.id, 90)).await.unwrap();
    service.add_group_expense(&group.id, new_expense(&a.id, 30)).await.unwrap();

    service.delete_person(&c.id).await.unwrap();

    assert!(service.list_single_transactions(Some(&c.id)).await.unwrap().is_empty());
    let group = service.get_group(&group.id).await.unwrap();
    assert_eq!(group.member_ids, vec![a.id.clone(), b.id.clone()]);

    // c's expense stays on record but no longer credits anyone
    let stats = service.group_stats(&group.id).await.unwrap();
    assert_eq!(stats.total_expense, Money::from_major(120));
    assert_eq!(stats.fair_share, Money::from_major(60));
    assert_eq!(stats.balances[&a.id], Money::from_major(-30));
    assert_eq!(stats.balances[&b.id], Money::from_major(-60));

    let logs = service.activity().await.unwrap();
    assert_eq!(logs.last().unwrap().action, PERSON_DELETED);
    assert!(matches!(
        service.delete_person(&c.id).await,
        Err(LedgerError::PersonNotFound(_))
    ));
}

#[tokio::test]
async fn test_all_group_members() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let _loner = service.add_person(new_person("Loner")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    service
        .add_group(NewGroup {
            name: "Pair".to_string(),
            member_ids: vec![b.id.clone(), a.id.clone()],
        })
        .await
        .unwrap();

    let members = service.all_group_members().await.unwrap();

    let names: Vec<&str> = members.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Asha", "Bilal"]);
}

#[tokio::test]
async fn test_entries_and_budgets() {
    let service = create_test_service();
    let date = Some(super::at(2026, 5, 10, 12));
    let groceries = service
        .add_entry(NewEntry {
            kind: EntryKind::Expense,
            amount: Money::from_major(80),
            category_id: "food".to_string(),
            note: "groceries".to_string(),
            date,
        })
        .await
        .unwrap();
    service
        .add_entry(NewEntry {
            kind: EntryKind::Income,
            amount: Money::from_major(1_000),
            category_id: "salary".to_string(),
            note: String::new(),
            date,
        })
        .await
        .unwrap();

    service.set_budget(2026, 5, "food", Money::from_major(200)).await.unwrap();
    let budgets = service.set_budget(2026, 5, "fun", Money::from_major(50)).await.unwrap();
    assert_eq!(budgets.len(), 2);

    let report = service.budget_report(2026, 5).await.unwrap();
    assert_eq!(report.total_spent, Money::from_major(80));
    assert_eq!(report.lines[0].progress, dec!(40));

    let budgets = service.remove_budget(2026, 5, "fun").await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert!(service.budgets_for(2026, 6).await.unwrap().is_empty());
    assert!(matches!(
        service.remove_budget(2026, 5, "fun").await,
        Err(LedgerError::BudgetNotFound(_))
    ));
    assert!(matches!(
        service.set_budget(2026, 13, "food", Money::from_major(1)).await,
        Err(LedgerError::InvalidPeriod { .. })
    ));

    service.delete_entry(&groceries.id).await.unwrap();
    assert_eq!(service.list_entries().await.unwrap().len(), 1);

    service.clear_personal_data().await.unwrap();
    assert!(service.list_entries().await.unwrap().is_empty());
    assert!(service.budgets_for(2026, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_long_text_is_rejected() {
    let service = create_test_service().with_max_text_length(5);

    let result = service.add_person(new_person("Bartholomew")).await;

    assert!(matches!(result, Err(LedgerError::InvalidInput(_, _))));
}

fn new_entry(kind: EntryKind, category_id: &str, amount: i64) -> NewEntry {
    NewEntry {
        kind,
        amount: Money::from_major(amount),
        category_id: category_id.to_string(),
        note: String::new(),
        date: Some(super::at(2026, 5, 10, 12)),
    }
}

#[tokio::test]
async fn test_add_group_members_lowers_fair_share() {
    let service = create_test_service();
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let c = service.add_person(new_person("Chen")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Flat".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await
        .unwrap();
    service.add_group_expense(&group.id, new_expense(&a.id, 90)).await.unwrap();
    assert_eq!(service.group_stats(&group.id).await.unwrap().fair_share, Money::new(dec!(45)));

    let updated = service
        .add_group_members(&group.id, vec![c.id.clone(), a.id.clone(), c.id.clone()])
        .await
        .unwrap();

    assert_eq!(updated.member_ids, vec![a.id.clone(), b.id.clone(), c.id.clone()]);
    let stats = service.group_stats(&group.id).await.unwrap();
    assert_eq!(stats.member_count, 3);
    assert_eq!(stats.fair_share, Money::from_major(30));
    assert_eq!(stats.balances[&c.id], Money::from_major(-30));
    assert_eq!(service.activity().await.unwrap().last().unwrap().action, GROUP_MEMBERS_ADDED);

    let again = service.add_group_members(&group.id, vec![c.id.clone()]).await.unwrap();
    assert_eq!(again.member_ids.len(), 3);
    assert!(matches!(
        service.add_group_members(&group.id, vec!["ghost".to_string()]).await,
        Err(LedgerError::PersonNotFound(_))
    ));
    assert!(matches!(
        service.add_group_members("missing", vec![c.id.clone()]).await,
        Err(LedgerError::GroupNotFound(_))
    ));
}

#[tokio::test]
async fn test_default_categories_until_saved() {
    let service = create_test_service();

    let categories = service.list_categories().await.unwrap();
    assert!(categories.iter().any(|c| c.id == "food" && c.kind == EntryKind::Expense));
    assert!(categories.iter().any(|c| c.id == "salary" && c.kind == EntryKind::Income));

    let saved = service
        .save_categories(vec![Category::new("pets", "Pets", EntryKind::Expense)])
        .await
        .unwrap();

    let expense_ids: Vec<&str> = saved
        .iter()
        .filter(|c| c.kind == EntryKind::Expense)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(expense_ids, vec!["pets"]);
    // no income categories saved, so the built-in ones remain
    assert!(saved.iter().any(|c| c.id == "salary"));
}

#[tokio::test]
async fn test_save_categories_rejects_duplicates() {
    let service = create_test_service();

    let result = service
        .save_categories(vec![
            Category::new("pets", "Pets", EntryKind::Expense),
            Category::new("pets", "Animals", EntryKind::Expense),
        ])
        .await;

    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "id"));
}

#[tokio::test]
async fn test_entry_category_must_exist_for_its_kind() {
    let service = create_test_service();

    let unknown = service.add_entry(new_entry(EntryKind::Expense, "yachts", 10)).await;
    assert!(matches!(unknown, Err(LedgerError::InvalidInput(field, _)) if field == "category_id"));

    let wrong_kind = service.add_entry(new_entry(EntryKind::Income, "food", 10)).await;
    assert!(matches!(wrong_kind, Err(LedgerError::InvalidInput(field, _)) if field == "category_id"));

    service
        .save_categories(vec![Category::new("pets", "Pets", EntryKind::Expense)])
        .await
        .unwrap();
    service.add_entry(new_entry(EntryKind::Expense, "pets", 10)).await.unwrap();
    assert!(service.add_entry(new_entry(EntryKind::Expense, "food", 10)).await.is_err());
}

#[tokio::test]
async fn test_clear_personal_data_resets_categories() {
    let service = create_test_service();
    service
        .save_categories(vec![Category::new("pets", "Pets", EntryKind::Expense)])
        .await
        .unwrap();

    service.clear_personal_data().await.unwrap();

    let categories = service.list_categories().await.unwrap();
    assert!(categories.iter().all(|c| c.id != "pets"));
    assert!(categories.iter().any(|c| c.id == "food"));
}

#[tokio::test]
async fn test_monthly_statistics_and_day_sections() {
    let service = create_test_service();
    service.add_entry(new_entry(EntryKind::Expense, "food", 62)).await.unwrap();
    service.add_entry(new_entry(EntryKind::Expense, "transport", 31)).await.unwrap();
    service.add_entry(new_entry(EntryKind::Income, "salary", 500)).await.unwrap();

    let stats = service.monthly_statistics(2026, 5).await.unwrap();
    assert_eq!(stats.income, Money::from_major(500));
    assert_eq!(stats.expense, Money::from_major(93));
    assert_eq!(stats.net, Money::from_major(407));
    assert_eq!(stats.daily_average, Money::from_major(3));
    assert_eq!(stats.top_categories[0].category_id, "food");

    let days = service.entries_by_day(2026, 5).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].entries.len(), 3);
    assert!(service.entries_by_day(2026, 6).await.unwrap().is_empty());
    assert!(matches!(
        service.monthly_statistics(2026, 0).await,
        Err(LedgerError::InvalidPeriod { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_all_kept() {
    let service = Arc::new(create_test_service());

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.add_person(new_person(&format!("Person {}", i))).await })
        })
        .collect();
    let mut added = Vec::new();
    for handle in handles {
        added.push(handle.await.unwrap().unwrap());
    }

    let people = service.list_people().await.unwrap();
    assert_eq!(people.len(), 50);
    for person in &added {
        assert!(service.get_person(&person.id).await.is_ok());
    }
}

/// In-memory store whose writes to one key fail while `failing` is set.
struct FlakyStore {
    inner: InMemoryStore,
    key: &'static str,
    failing: Arc<AtomicBool>,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), LedgerError> {
        if key == self.key && self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::StorageError(format!("write to {} failed", key)));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), LedgerError> {
        self.inner.remove(keys).await
    }
}

#[tokio::test]
async fn test_failed_delete_person_can_be_retried() {
    let failing = Arc::new(AtomicBool::new(false));
    let store = FlakyStore {
        inner: InMemoryStore::new(),
        key: GROUPS_KEY,
        failing: Arc::clone(&failing),
    };
    let service = LedgerService::new(store, InMemoryActivityLog::new());
    let a = service.add_person(new_person("Asha")).await.unwrap();
    let b = service.add_person(new_person("Bilal")).await.unwrap();
    let c = service.add_person(new_person("Chen")).await.unwrap();
    let group = service
        .add_group(NewGroup {
            name: "Trip".to_string(),
            member_ids: vec![a.id.clone(), b.id.clone(), c.id.clone()],
        })
        .await
        .unwrap();

    failing.store(true, Ordering::SeqCst);
    assert!(matches!(
        service.delete_person(&c.id).await,
        Err(LedgerError::StorageError(_))
    ));
    assert!(service.get_person(&c.id).await.is_ok());

    failing.store(false, Ordering::SeqCst);
    service.delete_person(&c.id).await.unwrap();
    assert!(service.get_person(&c.id).await.is_err());
    assert!(!service.get_group(&group.id).await.unwrap().is_member(&c.id));
}

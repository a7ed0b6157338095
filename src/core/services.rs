use crate::core::analytics;
use crate::core::balance::{compute_group_stats, compute_person_balance};
use crate::core::constants::{
    BUDGET_REMOVED, BUDGET_SET, BUDGETS_KEY, CATEGORIES_KEY, CATEGORIES_SAVED, ENTRIES_KEY, ENTRY_ADDED, ENTRY_DELETED,
    GROUP_CREATED, GROUP_DELETED, GROUP_EXPENSE_ADDED, GROUP_EXPENSE_DELETED, GROUP_EXPENSES_KEY, GROUP_MEMBERS_ADDED,
    GROUPS_KEY, MAX_AMOUNT, MIN_GROUP_MEMBERS, PEOPLE_KEY, PERSON_ADDED, PERSON_DELETED, PERSONAL_DATA_CLEARED,
    SINGLE_TRANSACTIONS_KEY, TOP_CATEGORY_LIMIT, TRANSACTION_ADDED, TRANSACTION_DELETED,
};
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{
    ActivityEntry, BudgetReport, Budgets, Category, DaySection, Entry, EntryKind, Group, GroupExpense, GroupStats,
    Money, MonthlyStatistics, NewEntry, NewGroup, NewGroupExpense, NewPerson, NewSingleTransaction, Person, Settlement,
    SingleTransaction, default_categories,
};
use crate::core::settlement::simplify_settlements;
use crate::infrastructure::logging::ActivityLog;
use crate::infrastructure::storage::KeyValueStore;
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 255;

/// Period key -> budgets for that month.
type BudgetBook = IndexMap<String, Budgets>;

/// Record lifecycle and balance queries over a key-value store.
///
/// Every collection lives under one key as a JSON array and is rewritten in
/// full on each mutation. Mutations through one service are serialized by
/// `write_lock`; separate processes sharing a store are not coordinated.
pub struct LedgerService<S: KeyValueStore, L: ActivityLog> {
    storage: S,
    logging: L,
    max_text_length: usize,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore, L: ActivityLog> LedgerService<S, L> {
    pub fn new(storage: S, logging: L) -> Self {
        LedgerService {
            storage,
            logging,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, LedgerError> {
        match self.storage.get(key).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), LedgerError> {
        let data = serde_json::to_string(items)?;
        self.storage.set(key, data).await
    }

    async fn load_budget_book(&self) -> Result<BudgetBook, LedgerError> {
        match self.storage.get(BUDGETS_KEY).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(BudgetBook::new()),
        }
    }

    async fn save_budget_book(&self, book: &BudgetBook) -> Result<(), LedgerError> {
        let data = serde_json::to_string(book)?;
        self.storage.set(BUDGETS_KEY, data).await
    }

    async fn record(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        debug!("{} {}", action, details);
        self.logging.log_action(action, details).await
    }

    fn validate_text(&self, field: &str, value: &str, required: bool) -> Result<(), LedgerError> {
        if required && value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, format!("Invalid {}", field), format!("{} cannot be empty", field)),
            ));
        }
        if value.chars().count() > self.max_text_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("{} Too Long", field),
                    format!("{} cannot exceed {} characters", field, self.max_text_length),
                ),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("Invalid {}", field),
                    format!("{} contains invalid characters", field),
                ),
            ));
        }
        Ok(())
    }

    fn validate_amount(&self, field: &str, amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", "Amount must be greater than 0"),
            ));
        }
        if amount > Money::from_major(MAX_AMOUNT) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Amount Too Large", format!("Amount cannot exceed {}", MAX_AMOUNT)),
            ));
        }
        if amount.amount().normalize().scale() > 2 {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", "Amount cannot have more than 2 decimal places"),
            ));
        }
        Ok(())
    }

    fn period_key(year: i32, month: u32) -> Result<String, LedgerError> {
        if !(1..=12).contains(&month) || !(1970..=9999).contains(&year) {
            return Err(LedgerError::InvalidPeriod { year, month });
        }
        Ok(format!("{:04}-{:02}", year, month))
    }

    // People

    pub async fn add_person(&self, person: NewPerson) -> Result<Person, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.validate_text("name", &person.name, true)?;
        if let Some(phone) = &person.phone {
            self.validate_text("phone", phone, false)?;
        }

        let mut people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        let new_person = Person {
            id: Uuid::new_v4().to_string(),
            name: person.name.trim().to_string(),
            phone: person.phone.filter(|p| !p.trim().is_empty()),
            created_at: Utc::now(),
        };
        people.push(new_person.clone());
        self.save(PEOPLE_KEY, &people).await?;

        info!("Added person {}", new_person.id);
        self.record(PERSON_ADDED, json!({ "person_id": new_person.id, "name": new_person.name }))
            .await?;
        Ok(new_person)
    }

    pub async fn list_people(&self) -> Result<Vec<Person>, LedgerError> {
        self.load(PEOPLE_KEY).await
    }

    pub async fn get_person(&self, person_id: &str) -> Result<Person, LedgerError> {
        let people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        people
            .into_iter()
            .find(|p| p.id == person_id)
            .ok_or_else(|| LedgerError::PersonNotFound(person_id.to_string()))
    }

    /// Removes the person, their single transactions and their group
    /// memberships. Group expenses they paid are left untouched.
    ///
    /// Dependent records go first and the person record last, so a failed
    /// write leaves the person in place and the delete can be retried.
    pub async fn delete_person(&self, person_id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        if !people.iter().any(|p| p.id == person_id) {
            return Err(LedgerError::PersonNotFound(person_id.to_string()));
        }

        let mut transactions: Vec<SingleTransaction> = self.load(SINGLE_TRANSACTIONS_KEY).await?;
        let tx_before = transactions.len();
        transactions.retain(|t| t.person_id != person_id);
        let removed_transactions = tx_before - transactions.len();
        if removed_transactions > 0 {
            self.save(SINGLE_TRANSACTIONS_KEY, &transactions).await?;
        }

        let mut groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        let mut affected_groups = Vec::new();
        for group in groups.iter_mut() {
            if group.is_member(person_id) {
                group.member_ids.retain(|m| m != person_id);
                affected_groups.push(group.id.clone());
            }
        }
        if !affected_groups.is_empty() {
            warn!(
                "Person {} removed from {} group(s); their paid expenses no longer count",
                person_id,
                affected_groups.len()
            );
            self.save(GROUPS_KEY, &groups).await?;
        }

        people.retain(|p| p.id != person_id);
        self.save(PEOPLE_KEY, &people).await?;

        info!("Deleted person {}", person_id);
        self.record(
            PERSON_DELETED,
            json!({
                "person_id": person_id,
                "removed_transactions": removed_transactions,
                "affected_groups": affected_groups
            }),
        )
        .await
    }

    // Single transactions

    pub async fn add_single_transaction(
        &self,
        person_id: &str,
        transaction: NewSingleTransaction,
    ) -> Result<SingleTransaction, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.get_person(person_id).await?;
        self.validate_amount("amount", transaction.amount)?;
        self.validate_text("note", &transaction.note, false)?;

        let mut transactions: Vec<SingleTransaction> = self.load(SINGLE_TRANSACTIONS_KEY).await?;
        let now = Utc::now();
        let new_transaction = SingleTransaction {
            id: Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            kind: transaction.kind,
            amount: transaction.amount,
            note: transaction.note,
            date: transaction.date.unwrap_or(now),
            created_at: now,
        };
        transactions.push(new_transaction.clone());
        self.save(SINGLE_TRANSACTIONS_KEY, &transactions).await?;

        info!("Added {} transaction {} for person {}", new_transaction.kind, new_transaction.id, person_id);
        self.record(
            TRANSACTION_ADDED,
            json!({
                "transaction_id": new_transaction.id,
                "person_id": person_id,
                "type": new_transaction.kind,
                "amount": new_transaction.amount
            }),
        )
        .await?;
        Ok(new_transaction)
    }

    pub async fn list_single_transactions(&self, person_id: Option<&str>) -> Result<Vec<SingleTransaction>, LedgerError> {
        let transactions: Vec<SingleTransaction> = self.load(SINGLE_TRANSACTIONS_KEY).await?;
        Ok(match person_id {
            Some(id) => transactions.into_iter().filter(|t| t.person_id == id).collect(),
            None => transactions,
        })
    }

    pub async fn delete_single_transaction(&self, transaction_id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut transactions: Vec<SingleTransaction> = self.load(SINGLE_TRANSACTIONS_KEY).await?;
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        if transactions.len() == before {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        self.save(SINGLE_TRANSACTIONS_KEY, &transactions).await?;

        info!("Deleted transaction {}", transaction_id);
        self.record(TRANSACTION_DELETED, json!({ "transaction_id": transaction_id }))
            .await
    }

    /// Positive means the person owes the owner. Unknown people have a zero
    /// balance.
    pub async fn person_balance(&self, person_id: &str) -> Result<Money, LedgerError> {
        let transactions: Vec<SingleTransaction> = self.load(SINGLE_TRANSACTIONS_KEY).await?;
        Ok(compute_person_balance(&transactions, person_id))
    }

    // Groups

    pub async fn add_group(&self, group: NewGroup) -> Result<Group, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.validate_text("name", &group.name, true)?;

        let mut seen = HashSet::new();
        for member_id in &group.member_ids {
            if !seen.insert(member_id.as_str()) {
                return Err(LedgerError::DuplicateMember(member_id.clone()));
            }
        }
        if group.member_ids.len() < MIN_GROUP_MEMBERS {
            return Err(LedgerError::NotEnoughMembers {
                required: MIN_GROUP_MEMBERS,
                actual: group.member_ids.len(),
            });
        }

        let people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        if let Some(missing) = group
            .member_ids
            .iter()
            .find(|id| !people.iter().any(|p| &p.id == *id))
        {
            return Err(LedgerError::PersonNotFound(missing.clone()));
        }

        let mut groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        let new_group = Group {
            id: Uuid::new_v4().to_string(),
            name: group.name.trim().to_string(),
            member_ids: group.member_ids,
            created_at: Utc::now(),
        };
        groups.push(new_group.clone());
        self.save(GROUPS_KEY, &groups).await?;

        info!("Created group {} with {} members", new_group.id, new_group.member_ids.len());
        self.record(
            GROUP_CREATED,
            json!({
                "group_id": new_group.id,
                "name": new_group.name,
                "member_ids": new_group.member_ids
            }),
        )
        .await?;
        Ok(new_group)
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, LedgerError> {
        self.load(GROUPS_KEY).await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        let groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        groups
            .into_iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    /// Adds existing people to a group. Ids already in the group are skipped;
    /// the fair share is recomputed from the new member count on the next
    /// stats query.
    pub async fn add_group_members(&self, group_id: &str, member_ids: Vec<String>) -> Result<Group, LedgerError> {
        let _guard = self.write_lock.lock().await;
        if member_ids.is_empty() {
            return Err(LedgerError::InvalidInput(
                "member_ids".to_string(),
                FieldError::new("member_ids", "No Members", "Select at least one person to add"),
            ));
        }

        let people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        if let Some(missing) = member_ids.iter().find(|id| !people.iter().any(|p| &p.id == *id)) {
            return Err(LedgerError::PersonNotFound(missing.clone()));
        }

        let mut groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        let added = group.add_members(&member_ids);
        let updated = group.clone();
        if added.is_empty() {
            debug!("Group {} already has every requested member", group_id);
            return Ok(updated);
        }
        self.save(GROUPS_KEY, &groups).await?;

        info!("Added {} member(s) to group {}", added.len(), group_id);
        self.record(GROUP_MEMBERS_ADDED, json!({ "group_id": group_id, "member_ids": added }))
            .await?;
        Ok(updated)
    }

    /// Removes the group and all of its expenses.
    pub async fn delete_group(&self, group_id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == before {
            return Err(LedgerError::GroupNotFound(group_id.to_string()));
        }
        self.save(GROUPS_KEY, &groups).await?;

        let mut expenses: Vec<GroupExpense> = self.load(GROUP_EXPENSES_KEY).await?;
        let expenses_before = expenses.len();
        expenses.retain(|e| e.group_id != group_id);
        let removed_expenses = expenses_before - expenses.len();
        if removed_expenses > 0 {
            self.save(GROUP_EXPENSES_KEY, &expenses).await?;
        }

        info!("Deleted group {} and {} expense(s)", group_id, removed_expenses);
        self.record(
            GROUP_DELETED,
            json!({ "group_id": group_id, "removed_expenses": removed_expenses }),
        )
        .await
    }

    // Group expenses

    pub async fn add_group_expense(
        &self,
        group_id: &str,
        expense: NewGroupExpense,
    ) -> Result<GroupExpense, LedgerError> {
        let _guard = self.write_lock.lock().await;
        let group = self.get_group(group_id).await?;
        if !group.is_member(&expense.paid_by) {
            warn!("Payer {} not in group {}", expense.paid_by, group_id);
            return Err(LedgerError::PayerNotInGroup(expense.paid_by));
        }
        self.validate_amount("amount", expense.amount)?;
        self.validate_text("description", &expense.description, false)?;

        let mut expenses: Vec<GroupExpense> = self.load(GROUP_EXPENSES_KEY).await?;
        let now = Utc::now();
        let new_expense = GroupExpense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            description: expense.description,
            amount: expense.amount,
            paid_by: expense.paid_by,
            date: expense.date.unwrap_or(now),
            created_at: now,
        };
        expenses.push(new_expense.clone());
        self.save(GROUP_EXPENSES_KEY, &expenses).await?;

        info!("Added expense {} to group {}", new_expense.id, group_id);
        self.record(
            GROUP_EXPENSE_ADDED,
            json!({
                "expense_id": new_expense.id,
                "group_id": group_id,
                "amount": new_expense.amount,
                "paid_by": new_expense.paid_by
            }),
        )
        .await?;
        Ok(new_expense)
    }

    pub async fn list_group_expenses(&self, group_id: &str) -> Result<Vec<GroupExpense>, LedgerError> {
        self.get_group(group_id).await?;
        let expenses: Vec<GroupExpense> = self.load(GROUP_EXPENSES_KEY).await?;
        Ok(expenses.into_iter().filter(|e| e.group_id == group_id).collect())
    }

    pub async fn delete_group_expense(&self, expense_id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut expenses: Vec<GroupExpense> = self.load(GROUP_EXPENSES_KEY).await?;
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Err(LedgerError::GroupExpenseNotFound(expense_id.to_string()));
        }
        self.save(GROUP_EXPENSES_KEY, &expenses).await?;

        info!("Deleted group expense {}", expense_id);
        self.record(GROUP_EXPENSE_DELETED, json!({ "expense_id": expense_id }))
            .await
    }

    pub async fn group_stats(&self, group_id: &str) -> Result<GroupStats, LedgerError> {
        let group = self.get_group(group_id).await?;
        let expenses: Vec<GroupExpense> = self.load(GROUP_EXPENSES_KEY).await?;
        Ok(compute_group_stats(&group, &expenses))
    }

    pub async fn group_settlements(&self, group_id: &str) -> Result<Vec<Settlement>, LedgerError> {
        let stats = self.group_stats(group_id).await?;
        let people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        let settlements = simplify_settlements(&stats.balances, &people);
        debug!("Group {} settles in {} payment(s)", group_id, settlements.len());
        Ok(settlements)
    }

    /// People that belong to at least one group, in people order.
    pub async fn all_group_members(&self) -> Result<Vec<Person>, LedgerError> {
        let groups: Vec<Group> = self.load(GROUPS_KEY).await?;
        let people: Vec<Person> = self.load(PEOPLE_KEY).await?;
        let member_ids: HashSet<&str> = groups
            .iter()
            .flat_map(|g| g.member_ids.iter().map(String::as_str))
            .collect();
        Ok(people
            .into_iter()
            .filter(|p| member_ids.contains(p.id.as_str()))
            .collect())
    }

    // Personal entries

    pub async fn add_entry(&self, entry: NewEntry) -> Result<Entry, LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.validate_amount("amount", entry.amount)?;
        self.validate_text("category_id", &entry.category_id, true)?;
        self.validate_text("note", &entry.note, false)?;
        let categories = self.categories_of(entry.kind).await?;
        if !categories.iter().any(|c| c.id == entry.category_id) {
            return Err(LedgerError::InvalidInput(
                "category_id".to_string(),
                FieldError::new(
                    "category_id",
                    "Unknown Category",
                    format!("No {} category named {}", entry.kind, entry.category_id),
                ),
            ));
        }

        let mut entries: Vec<Entry> = self.load(ENTRIES_KEY).await?;
        let now = Utc::now();
        let new_entry = Entry {
            id: Uuid::new_v4().to_string(),
            kind: entry.kind,
            amount: entry.amount,
            category_id: entry.category_id,
            note: entry.note,
            date: entry.date.unwrap_or(now),
            created_at: now,
        };
        entries.push(new_entry.clone());
        self.save(ENTRIES_KEY, &entries).await?;

        info!("Added entry {}", new_entry.id);
        self.record(
            ENTRY_ADDED,
            json!({
                "entry_id": new_entry.id,
                "type": new_entry.kind,
                "amount": new_entry.amount,
                "category_id": new_entry.category_id
            }),
        )
        .await?;
        Ok(new_entry)
    }

    pub async fn list_entries(&self) -> Result<Vec<Entry>, LedgerError> {
        self.load(ENTRIES_KEY).await
    }

    /// Entries of one month bucketed by day, newest first.
    pub async fn entries_by_day(&self, year: i32, month: u32) -> Result<Vec<DaySection>, LedgerError> {
        Self::period_key(year, month)?;
        let entries: Vec<Entry> = self.load(ENTRIES_KEY).await?;
        Ok(analytics::group_by_day(&analytics::entries_in_month(&entries, year, month)))
    }

    pub async fn monthly_statistics(&self, year: i32, month: u32) -> Result<MonthlyStatistics, LedgerError> {
        Self::period_key(year, month)?;
        let entries: Vec<Entry> = self.load(ENTRIES_KEY).await?;
        Ok(analytics::monthly_statistics(&entries, year, month, TOP_CATEGORY_LIMIT))
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut entries: Vec<Entry> = self.load(ENTRIES_KEY).await?;
        let before = entries.len();
        entries.retain(|e| e.id != entry_id);
        if entries.len() == before {
            return Err(LedgerError::EntryNotFound(entry_id.to_string()));
        }
        self.save(ENTRIES_KEY, &entries).await?;

        info!("Deleted entry {}", entry_id);
        self.record(ENTRY_DELETED, json!({ "entry_id": entry_id })).await
    }

    // Categories

    /// Saved categories, with the built-in set standing in for any kind the
    /// user has not saved categories of.
    pub async fn list_categories(&self) -> Result<Vec<Category>, LedgerError> {
        let mut categories = self.categories_of(EntryKind::Expense).await?;
        categories.extend(self.categories_of(EntryKind::Income).await?);
        Ok(categories)
    }

    async fn categories_of(&self, kind: EntryKind) -> Result<Vec<Category>, LedgerError> {
        let saved: Vec<Category> = self.load(CATEGORIES_KEY).await?;
        let of_kind: Vec<Category> = saved.into_iter().filter(|c| c.kind == kind).collect();
        if of_kind.is_empty() {
            Ok(default_categories(kind))
        } else {
            Ok(of_kind)
        }
    }

    /// Replaces the saved category list.
    pub async fn save_categories(&self, categories: Vec<Category>) -> Result<Vec<Category>, LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut seen = HashSet::new();
        for category in &categories {
            self.validate_text("id", &category.id, true)?;
            self.validate_text("name", &category.name, true)?;
            if !seen.insert(category.id.as_str()) {
                return Err(LedgerError::InvalidInput(
                    "id".to_string(),
                    FieldError::new(
                        "id",
                        "Duplicate Category",
                        format!("Category {} is listed more than once", category.id),
                    ),
                ));
            }
        }
        self.save(CATEGORIES_KEY, &categories).await?;

        info!("Saved {} categories", categories.len());
        self.record(CATEGORIES_SAVED, json!({ "count": categories.len() }))
            .await?;
        self.list_categories().await
    }

    // Budgets

    pub async fn set_budget(&self, year: i32, month: u32, category_id: &str, amount: Money) -> Result<Budgets, LedgerError> {
        let _guard = self.write_lock.lock().await;
        let key = Self::period_key(year, month)?;
        self.validate_text("category_id", category_id, true)?;
        self.validate_amount("amount", amount)?;

        let mut book = self.load_budget_book().await?;
        let budgets = book.entry(key.clone()).or_default();
        budgets.insert(category_id.to_string(), amount);
        let updated = budgets.clone();
        self.save_budget_book(&book).await?;

        info!("Set budget for {} in {}", category_id, key);
        self.record(
            BUDGET_SET,
            json!({ "period": key, "category_id": category_id, "amount": amount }),
        )
        .await?;
        Ok(updated)
    }

    pub async fn remove_budget(&self, year: i32, month: u32, category_id: &str) -> Result<Budgets, LedgerError> {
        let _guard = self.write_lock.lock().await;
        let key = Self::period_key(year, month)?;
        let mut book = self.load_budget_book().await?;
        let budgets = book
            .get_mut(&key)
            .ok_or_else(|| LedgerError::BudgetNotFound(category_id.to_string()))?;
        if budgets.shift_remove(category_id).is_none() {
            return Err(LedgerError::BudgetNotFound(category_id.to_string()));
        }
        let updated = budgets.clone();
        if updated.is_empty() {
            book.shift_remove(&key);
        }
        self.save_budget_book(&book).await?;

        info!("Removed budget for {} in {}", category_id, key);
        self.record(BUDGET_REMOVED, json!({ "period": key, "category_id": category_id }))
            .await?;
        Ok(updated)
    }

    pub async fn budgets_for(&self, year: i32, month: u32) -> Result<Budgets, LedgerError> {
        let key = Self::period_key(year, month)?;
        let mut book = self.load_budget_book().await?;
        Ok(book.shift_remove(&key).unwrap_or_default())
    }

    pub async fn budget_report(&self, year: i32, month: u32) -> Result<BudgetReport, LedgerError> {
        let budgets = self.budgets_for(year, month).await?;
        let entries: Vec<Entry> = self.load(ENTRIES_KEY).await?;
        Ok(analytics::budget_report(&entries, &budgets, year, month))
    }

    /// Drops all personal entries, budgets and saved categories. People,
    /// groups and their records are kept.
    pub async fn clear_personal_data(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(&[ENTRIES_KEY, BUDGETS_KEY, CATEGORIES_KEY]).await?;
        info!("Cleared personal entries, budgets and categories");
        self.record(PERSONAL_DATA_CLEARED, json!({})).await
    }

    pub async fn activity(&self) -> Result<Vec<ActivityEntry>, LedgerError> {
        self.logging.get_logs().await
    }
}

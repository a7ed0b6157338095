// Storage keys, one JSON document per key.
pub const PEOPLE_KEY: &str = "people";
pub const SINGLE_TRANSACTIONS_KEY: &str = "single_transactions";
pub const GROUPS_KEY: &str = "groups";
pub const GROUP_EXPENSES_KEY: &str = "group_expenses";
pub const ENTRIES_KEY: &str = "entries";
pub const BUDGETS_KEY: &str = "budgets";
pub const CATEGORIES_KEY: &str = "categories";

// Activity log actions.
pub const PERSON_ADDED: &str = "PERSON_ADDED";
pub const PERSON_DELETED: &str = "PERSON_DELETED";
pub const TRANSACTION_ADDED: &str = "TRANSACTION_ADDED";
pub const TRANSACTION_DELETED: &str = "TRANSACTION_DELETED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const GROUP_EXPENSE_ADDED: &str = "GROUP_EXPENSE_ADDED";
pub const GROUP_EXPENSE_DELETED: &str = "GROUP_EXPENSE_DELETED";
pub const ENTRY_ADDED: &str = "ENTRY_ADDED";
pub const ENTRY_DELETED: &str = "ENTRY_DELETED";
pub const BUDGET_SET: &str = "BUDGET_SET";
pub const BUDGET_REMOVED: &str = "BUDGET_REMOVED";
pub const GROUP_MEMBERS_ADDED: &str = "GROUP_MEMBERS_ADDED";
pub const CATEGORIES_SAVED: &str = "CATEGORIES_SAVED";
pub const PERSONAL_DATA_CLEARED: &str = "PERSONAL_DATA_CLEARED";

pub const MIN_GROUP_MEMBERS: usize = 2;
pub const MAX_AMOUNT: i64 = 1_000_000;
pub const TOP_CATEGORY_LIMIT: usize = 5;

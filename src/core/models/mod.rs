pub mod audit;
pub mod category;
pub mod entry;
pub mod group;
pub mod group_expense;
pub mod money;
pub mod person;
pub mod settlement;
pub mod transaction;

pub use audit::ActivityEntry;
pub use category::{Category, default_categories};
pub use entry::{
    BudgetLine, BudgetReport, Budgets, CategoryTotal, DaySection, Entry, EntryKind, MonthlyStatistics, NewEntry,
};
pub use group::{Balances, Group, GroupStats, NewGroup};
pub use group_expense::{GroupExpense, NewGroupExpense};
pub use money::Money;
pub use person::{NewPerson, Person};
pub use settlement::Settlement;
pub use transaction::{NewSingleTransaction, SingleTransaction, TransactionKind};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    #[error("Person {0} not found")]
    PersonNotFound(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),
    #[error("Group expense {0} not found")]
    GroupExpenseNotFound(String),
    #[error("Entry {0} not found")]
    EntryNotFound(String),
    #[error("Budget for category {0} not found")]
    BudgetNotFound(String),
    #[error("Person {0} is listed more than once")]
    DuplicateMember(String),
    #[error("A group needs at least {required} members, got {actual}")]
    NotEnoughMembers { required: usize, actual: usize },
    #[error("Payer {0} is not a group member")]
    PayerNotInGroup(String),
    #[error("Invalid period {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::StorageError(err.to_string())
    }
}

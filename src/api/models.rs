use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::core::errors::LedgerError;
use crate::core::models::Money;

#[derive(Deserialize)]
pub struct SetBudgetRequest {
    pub amount: Money,
}

#[derive(Serialize, Deserialize)]
pub struct AddMembersRequest {
    pub member_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct ListTransactionsQuery {
    pub person_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct BalanceResponse {
    pub person_id: String,
    /// Positive: the person owes you. Negative: you owe the person.
    pub balance: Money,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::PersonNotFound(_)
            | LedgerError::GroupNotFound(_)
            | LedgerError::TransactionNotFound(_)
            | LedgerError::GroupExpenseNotFound(_)
            | LedgerError::EntryNotFound(_)
            | LedgerError::BudgetNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::DuplicateMember(_) => StatusCode::CONFLICT,
            LedgerError::NotEnoughMembers { .. }
            | LedgerError::PayerNotInGroup(_)
            | LedgerError::InvalidPeriod { .. }
            | LedgerError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            LedgerError::StorageError(_) | LedgerError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error = match &self.0 {
            LedgerError::InvalidInput(_, field_error) => field_error.description.clone(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}

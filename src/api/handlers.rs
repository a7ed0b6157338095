use crate::{
    api::models::*,
    core::{
        models::{
            ActivityEntry, BudgetReport, Budgets, Category, DaySection, Entry, Group, GroupExpense, GroupStats,
            MonthlyStatistics, NewEntry, NewGroup, NewGroupExpense, NewPerson, NewSingleTransaction, Person, Settlement,
            SingleTransaction,
        },
        services::LedgerService,
    },
    infrastructure::{logging::in_memory::InMemoryActivityLog, storage::SharedStore},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use std::sync::Arc;

pub type AppService = LedgerService<SharedStore, InMemoryActivityLog>;
type AppState = State<Arc<AppService>>;

pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/people", get(list_people).post(add_person))
        .route("/people/{person_id}", get(get_person).delete(delete_person))
        .route("/people/{person_id}/balance", get(person_balance))
        .route(
            "/people/{person_id}/transactions",
            get(list_person_transactions).post(add_single_transaction),
        )
        .route("/transactions", get(list_transactions))
        .route("/transactions/{transaction_id}", axum::routing::delete(delete_single_transaction))
        .route("/groups", get(list_groups).post(add_group))
        .route("/groups/{group_id}", get(get_group).delete(delete_group))
        .route(
            "/groups/{group_id}/expenses",
            get(list_group_expenses).post(add_group_expense),
        )
        .route("/groups/{group_id}/members", post(add_group_members))
        .route("/groups/{group_id}/stats", get(group_stats))
        .route("/groups/{group_id}/settlements", get(group_settlements))
        .route("/group-expenses/{expense_id}", axum::routing::delete(delete_group_expense))
        .route("/group-members", get(all_group_members))
        .route("/entries", get(list_entries).post(add_entry))
        .route("/entries/{entry_id}", axum::routing::delete(delete_entry))
        .route("/entries/by-day/{year}/{month}", get(entries_by_day))
        .route("/statistics/{year}/{month}", get(monthly_statistics))
        .route("/categories", get(list_categories).put(save_categories))
        .route("/budgets/{year}/{month}", get(budgets_for))
        .route("/budget-reports/{year}/{month}", get(budget_report))
        .route(
            "/budgets/{year}/{month}/{category_id}",
            put(set_budget).delete(remove_budget),
        )
        .route("/activity", get(activity))
        .with_state(service)
}

async fn add_person(State(service): AppState, Json(req): Json<NewPerson>) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = service.add_person(req).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

async fn list_people(State(service): AppState) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(service.list_people().await?))
}

async fn get_person(State(service): AppState, Path(person_id): Path<String>) -> Result<Json<Person>, ApiError> {
    Ok(Json(service.get_person(&person_id).await?))
}

async fn delete_person(State(service): AppState, Path(person_id): Path<String>) -> Result<StatusCode, ApiError> {
    service.delete_person(&person_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn person_balance(
    State(service): AppState,
    Path(person_id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = service.person_balance(&person_id).await?;
    Ok(Json(BalanceResponse { person_id, balance }))
}

async fn add_single_transaction(
    State(service): AppState,
    Path(person_id): Path<String>,
    Json(req): Json<NewSingleTransaction>,
) -> Result<(StatusCode, Json<SingleTransaction>), ApiError> {
    let transaction = service.add_single_transaction(&person_id, req).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn list_person_transactions(
    State(service): AppState,
    Path(person_id): Path<String>,
) -> Result<Json<Vec<SingleTransaction>>, ApiError> {
    Ok(Json(service.list_single_transactions(Some(&person_id)).await?))
}

async fn list_transactions(
    State(service): AppState,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<SingleTransaction>>, ApiError> {
    Ok(Json(service.list_single_transactions(query.person_id.as_deref()).await?))
}

async fn delete_single_transaction(
    State(service): AppState,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_single_transaction(&transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_group(State(service): AppState, Json(req): Json<NewGroup>) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.add_group(req).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

async fn list_groups(State(service): AppState) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

async fn get_group(State(service): AppState, Path(group_id): Path<String>) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

async fn delete_group(State(service): AppState, Path(group_id): Path<String>) -> Result<StatusCode, ApiError> {
    service.delete_group(&group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_group_members(
    State(service): AppState,
    Path(group_id): Path<String>,
    Json(req): Json<AddMembersRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.add_group_members(&group_id, req.member_ids).await?))
}

async fn add_group_expense(
    State(service): AppState,
    Path(group_id): Path<String>,
    Json(req): Json<NewGroupExpense>,
) -> Result<(StatusCode, Json<GroupExpense>), ApiError> {
    let expense = service.add_group_expense(&group_id, req).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn list_group_expenses(
    State(service): AppState,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupExpense>>, ApiError> {
    Ok(Json(service.list_group_expenses(&group_id).await?))
}

async fn delete_group_expense(
    State(service): AppState,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_group_expense(&expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn group_stats(State(service): AppState, Path(group_id): Path<String>) -> Result<Json<GroupStats>, ApiError> {
    Ok(Json(service.group_stats(&group_id).await?))
}

async fn group_settlements(
    State(service): AppState,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    Ok(Json(service.group_settlements(&group_id).await?))
}

async fn all_group_members(State(service): AppState) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(service.all_group_members().await?))
}

async fn add_entry(State(service): AppState, Json(req): Json<NewEntry>) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let entry = service.add_entry(req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries(State(service): AppState) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(service.list_entries().await?))
}

async fn delete_entry(State(service): AppState, Path(entry_id): Path<String>) -> Result<StatusCode, ApiError> {
    service.delete_entry(&entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn entries_by_day(
    State(service): AppState,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<Vec<DaySection>>, ApiError> {
    Ok(Json(service.entries_by_day(year, month).await?))
}

async fn monthly_statistics(
    State(service): AppState,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthlyStatistics>, ApiError> {
    Ok(Json(service.monthly_statistics(year, month).await?))
}

async fn list_categories(State(service): AppState) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(service.list_categories().await?))
}

async fn save_categories(
    State(service): AppState,
    Json(req): Json<Vec<Category>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(service.save_categories(req).await?))
}

async fn budgets_for(
    State(service): AppState,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<Budgets>, ApiError> {
    Ok(Json(service.budgets_for(year, month).await?))
}

async fn budget_report(
    State(service): AppState,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<BudgetReport>, ApiError> {
    Ok(Json(service.budget_report(year, month).await?))
}

async fn set_budget(
    State(service): AppState,
    Path((year, month, category_id)): Path<(i32, u32, String)>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<Json<Budgets>, ApiError> {
    Ok(Json(service.set_budget(year, month, &category_id, req.amount).await?))
}

async fn remove_budget(
    State(service): AppState,
    Path((year, month, category_id)): Path<(i32, u32, String)>,
) -> Result<Json<Budgets>, ApiError> {
    Ok(Json(service.remove_budget(year, month, &category_id).await?))
}

async fn activity(State(service): AppState) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    Ok(Json(service.activity().await?))
}

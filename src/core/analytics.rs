use crate::core::models::{
    BudgetLine, BudgetReport, Budgets, CategoryTotal, DaySection, Entry, EntryKind, Money, MonthlyStatistics,
};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Sum of entry amounts, optionally restricted to one kind.
pub fn calculate_total(entries: &[Entry], filter: Option<EntryKind>) -> Money {
    entries
        .iter()
        .filter(|e| filter.is_none_or(|kind| e.kind == kind))
        .map(|e| e.amount)
        .sum()
}

/// Expense totals per category, in first-seen order. Income is ignored.
pub fn category_totals(entries: &[Entry]) -> IndexMap<String, Money> {
    let mut totals: IndexMap<String, Money> = IndexMap::new();
    for entry in entries.iter().filter(|e| e.kind == EntryKind::Expense) {
        *totals.entry(entry.category_id.clone()).or_insert(Money::ZERO) += entry.amount;
    }
    totals
}

pub fn daily_average(entries: &[Entry], days: u32) -> Money {
    calculate_total(entries, Some(EntryKind::Expense)).split(days as usize)
}

/// The `limit` largest expense categories.
pub fn top_categories(entries: &[Entry], limit: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = category_totals(entries)
        .into_iter()
        .map(|(category_id, amount)| CategoryTotal { category_id, amount })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals.truncate(limit);
    totals
}

/// Percentage of `budget` consumed by `spent`, capped at 100.
pub fn budget_progress(spent: Money, budget: Money) -> Decimal {
    if budget.is_zero() {
        return Decimal::ZERO;
    }
    let hundred = Decimal::ONE_HUNDRED;
    spent
        .checked_div(budget.amount())
        .and_then(|ratio| ratio.checked_mul(hundred))
        .map(|pct| pct.min(hundred))
        .unwrap_or(hundred)
}

/// Entries bucketed by UTC calendar day, newest day first and newest entry
/// first within each day.
pub fn group_by_day(entries: &[Entry]) -> Vec<DaySection> {
    let mut days: IndexMap<chrono::NaiveDate, Vec<Entry>> = IndexMap::new();
    for entry in entries {
        days.entry(entry.date.date_naive()).or_default().push(entry.clone());
    }

    let mut sections: Vec<DaySection> = days
        .into_iter()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            DaySection { date, entries }
        })
        .collect();
    sections.sort_by(|a, b| b.date.cmp(&a.date));
    sections
}

pub fn entries_in_month(entries: &[Entry], year: i32, month: u32) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .cloned()
        .collect()
}

/// Number of calendar days in the month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

pub fn monthly_statistics(entries: &[Entry], year: i32, month: u32, top_limit: usize) -> MonthlyStatistics {
    let month_entries = entries_in_month(entries, year, month);
    let income = calculate_total(&month_entries, Some(EntryKind::Income));
    let expense = calculate_total(&month_entries, Some(EntryKind::Expense));

    MonthlyStatistics {
        year,
        month,
        income,
        expense,
        net: income - expense,
        category_totals: category_totals(&month_entries)
            .into_iter()
            .map(|(category_id, amount)| CategoryTotal { category_id, amount })
            .collect(),
        top_categories: top_categories(&month_entries, top_limit),
        daily_average: daily_average(&month_entries, days_in_month(year, month)),
    }
}

/// Spending against each budgeted category for one month.
pub fn budget_report(entries: &[Entry], budgets: &Budgets, year: i32, month: u32) -> BudgetReport {
    let month_entries = entries_in_month(entries, year, month);
    let spent_by_category = category_totals(&month_entries);

    let lines: Vec<BudgetLine> = budgets
        .iter()
        .map(|(category_id, &budget)| {
            let spent = spent_by_category.get(category_id).copied().unwrap_or(Money::ZERO);
            BudgetLine {
                category_id: category_id.clone(),
                spent,
                budget,
                progress: budget_progress(spent, budget),
                over_budget: spent > budget,
            }
        })
        .collect();

    BudgetReport {
        year,
        month,
        total_budget: budgets.values().sum(),
        total_spent: calculate_total(&month_entries, Some(EntryKind::Expense)),
        lines,
    }
}

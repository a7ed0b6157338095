use crate::core::models::{Balances, Group, GroupExpense, GroupStats, Money, SingleTransaction, TransactionKind};

/// Running balance between the owner and `person_id`.
///
/// `give` entries add to it and `got` entries subtract from it, so a positive
/// result means the person owes the owner. Unknown ids yield zero.
pub fn compute_person_balance(transactions: &[SingleTransaction], person_id: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.person_id == person_id)
        .fold(Money::ZERO, |balance, t| match t.kind {
            TransactionKind::Give => balance + t.amount,
            TransactionKind::Got => balance - t.amount,
        })
}

/// Fair-share balances for a group.
///
/// Every member starts at minus the fair share and is credited with whatever
/// they paid. Expenses of other groups are ignored. Credits for payers that are
/// no longer members are dropped, so balances then no longer sum to zero.
pub fn compute_group_stats(group: &Group, expenses: &[GroupExpense]) -> GroupStats {
    let group_expenses: Vec<&GroupExpense> = expenses.iter().filter(|e| e.group_id == group.id).collect();
    let total_expense: Money = group_expenses.iter().map(|e| e.amount).sum();
    let member_count = group.member_ids.len();

    if member_count == 0 {
        return GroupStats {
            total_expense,
            fair_share: Money::ZERO,
            balances: Balances::new(),
            member_count,
        };
    }

    let fair_share = total_expense.split(member_count);
    let mut balances: Balances = group
        .member_ids
        .iter()
        .map(|member_id| (member_id.clone(), -fair_share))
        .collect();

    for expense in group_expenses {
        if let Some(balance) = balances.get_mut(&expense.paid_by) {
            *balance += expense.amount;
        }
    }

    GroupStats {
        total_expense,
        fair_share,
        balances,
        member_count,
    }
}

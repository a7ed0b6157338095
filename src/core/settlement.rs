use crate::core::models::{Balances, Money, Person, Settlement};

const UNKNOWN_NAME: &str = "Unknown";

struct Party<'a> {
    person_id: &'a str,
    name: &'a str,
    amount: Money,
}

fn name_of<'p>(people: &'p [Person], person_id: &str) -> &'p str {
    people
        .iter()
        .find(|p| p.id == person_id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_NAME)
}

/// Reduces a set of group balances to a short list of directed payments.
///
/// Creditors and debtors are each sorted by amount, largest first, and matched
/// greedily. Ties keep the order of `balances`. Amounts within
/// [`Money::EPSILON`] of zero count as settled and are never emitted. When the
/// balances do not sum to zero only the overlapping amount is settled.
pub fn simplify_settlements(balances: &Balances, people: &[Person]) -> Vec<Settlement> {
    let mut creditors = Vec::new();
    let mut debtors = Vec::new();
    for (person_id, &balance) in balances {
        if balance > Money::EPSILON {
            creditors.push(Party {
                person_id,
                name: name_of(people, person_id),
                amount: balance,
            });
        } else if balance < -Money::EPSILON {
            debtors.push(Party {
                person_id,
                name: name_of(people, person_id),
                amount: balance.abs(),
            });
        }
    }

    // sort_by is stable
    creditors.sort_by(|a, b| b.amount.cmp(&a.amount));
    debtors.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];
        let settle_amount = creditor.amount.min(debtor.amount);

        if settle_amount > Money::EPSILON {
            settlements.push(Settlement {
                from: debtor.person_id.to_string(),
                from_name: debtor.name.to_string(),
                to: creditor.person_id.to_string(),
                to_name: creditor.name.to_string(),
                amount: settle_amount,
            });
        }

        creditor.amount -= settle_amount;
        debtor.amount -= settle_amount;

        if creditor.amount <= Money::EPSILON {
            i += 1;
        }
        if debtor.amount <= Money::EPSILON {
            j += 1;
        }
    }

    settlements
}

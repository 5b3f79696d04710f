//! Balance aggregation over committed bills.
//!
//! Pure folds: nothing is cached, callers decide when to recompute.

use std::collections::BTreeMap;

use crate::{Bill, Money, PersonId};

/// Sum of the committed calculated amounts of `person_id` across `bills`.
///
/// Claims without a calculated amount are skipped. Per-claim amounts are already rounded, so
/// only the grand total is rounded.
#[must_use]
pub fn total_owed(bills: &[Bill], person_id: PersonId) -> Money {
    bills
        .iter()
        .flat_map(|bill| &bill.line_items)
        .flat_map(|line_item| &line_item.person_claims)
        .filter(|claim| claim.person_id == person_id)
        .filter_map(|claim| claim.calculated_amount)
        .sum::<Money>()
        .round()
}

/// Sum of the totals of the bills paid by `person_id`.
#[must_use]
pub fn total_paid(bills: &[Bill], person_id: PersonId) -> Money {
    bills
        .iter()
        .filter(|bill| bill.paid_by(person_id))
        .map(|bill| bill.total_amount)
        .sum::<Money>()
        .round()
}

/// Paid minus owed. Positive means the group owes `person_id` money.
#[must_use]
pub fn net_balance(bills: &[Bill], person_id: PersonId) -> Money {
    (total_paid(bills, person_id) - total_owed(bills, person_id)).round()
}

/// Net balance of every person in `people`, the input of the remote simplifier.
pub fn net_balances<I>(bills: &[Bill], people: I) -> BTreeMap<PersonId, Money>
where
    I: IntoIterator<Item = PersonId>,
{
    people
        .into_iter()
        .map(|person_id| (person_id, net_balance(bills, person_id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BillId, BillStatus, Currency, LineItem, LineItemId, Person, PersonClaim, SplitType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn claim(person: i64, amount: Option<Money>) -> PersonClaim {
        let mut claim = PersonClaim::new(PersonId::new(person), None);
        claim.calculated_amount = amount;
        claim
    }

    fn bill(id: i64, payer: Option<i64>, total: Money, claims: Vec<PersonClaim>) -> Bill {
        let mut item = LineItem::new(LineItemId::new(id * 10), "Item", total, SplitType::Shares);
        item.person_claims = claims;
        Bill {
            id: BillId::new(id),
            description: format!("Bill {id}"),
            currency: Currency::Eur,
            status: BillStatus::AllClaimed,
            date: NaiveDate::default(),
            is_closed: false,
            creator: None,
            payer: payer.map(|id| Person::new(PersonId::new(id), "Payer")),
            total_amount: total,
            line_items: vec![item],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn sample() -> Vec<Bill> {
        vec![
            bill(
                1,
                Some(1),
                Money::new(dec!(30)),
                vec![
                    claim(1, Some(Money::new(dec!(10)))),
                    claim(2, Some(Money::new(dec!(20)))),
                ],
            ),
            bill(
                2,
                Some(2),
                Money::new(dec!(9.99)),
                vec![
                    claim(1, Some(Money::new(dec!(3.33)))),
                    claim(2, Some(Money::new(dec!(3.33)))),
                    claim(3, None),
                ],
            ),
        ]
    }

    #[test]
    fn owed_skips_claims_without_calculated_amount() {
        let bills = sample();
        assert_eq!(total_owed(&bills, PersonId::new(1)).amount(), dec!(13.33));
        assert_eq!(total_owed(&bills, PersonId::new(3)), Money::ZERO);
    }

    #[test]
    fn paid_counts_whole_bills() {
        let bills = sample();
        assert_eq!(total_paid(&bills, PersonId::new(1)).amount(), dec!(30));
        assert_eq!(total_paid(&bills, PersonId::new(2)).amount(), dec!(9.99));
        assert_eq!(total_paid(&bills, PersonId::new(3)), Money::ZERO);
    }

    #[test]
    fn net_is_paid_minus_owed() {
        let bills = sample();
        assert_eq!(net_balance(&bills, PersonId::new(1)).amount(), dec!(16.67));
        assert_eq!(net_balance(&bills, PersonId::new(2)).amount(), dec!(-13.34));
    }

    #[test]
    fn net_balances_keeps_everyone_asked_for() {
        let balances = net_balances(&sample(), [PersonId::new(3), PersonId::new(1)]);
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[&PersonId::new(3)], Money::ZERO);
    }

    #[test]
    fn no_bills_means_zero() {
        assert_eq!(net_balance(&[], PersonId::new(1)), Money::ZERO);
    }
}

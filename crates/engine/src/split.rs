//! Split resolution: turns split values into per-person amounts.
//!
//! Every function here is pure. Nothing mutates its inputs and repeated calls on the same
//! snapshot return the same result, so previews can be recomputed on every edit.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    EngineError, LineItem, Money, Person, PersonClaim, PersonId, ResultEngine, SplitType,
};

fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

/// Amount owed for `person_shares` out of `total_shares` of `value`.
///
/// Returns zero when `total_shares` is zero. Fails with [`EngineError::InvalidAmount`] when
/// the product does not fit in a `Decimal`.
pub fn share_split(
    value: Money,
    person_shares: Decimal,
    total_shares: Decimal,
) -> ResultEngine<Money> {
    if total_shares.is_zero() {
        return Ok(Money::ZERO);
    }
    value
        .amount()
        .checked_mul(person_shares)
        .and_then(|product| product.checked_div(total_shares))
        .map(Money::rounded)
        .ok_or_else(too_large)
}

/// Resolves one person's amount on `line_item`.
///
/// For `Shares` the split value is a share count weighed against `total_shares`; for `Value` it
/// already is the amount and is only rounded.
pub fn resolve_amount(
    line_item: &LineItem,
    split_value: Decimal,
    total_shares: Decimal,
) -> ResultEngine<Money> {
    match line_item.split_type {
        SplitType::Shares => share_split(line_item.value, split_value, total_shares),
        SplitType::Value => Ok(Money::rounded(split_value)),
    }
}

/// Sum of every allocated entry, or [`EngineError::InvalidAmount`] when it overflows.
pub fn total_shares(entries: &BTreeMap<PersonId, Option<Decimal>>) -> ResultEngine<Decimal> {
    entries
        .values()
        .flatten()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
        .ok_or_else(too_large)
}

/// Live preview of what each person would owe on `line_item` with the given draft entries.
///
/// Absent entries are left out of the result.
pub fn preview_allocation(
    line_item: &LineItem,
    entries: &BTreeMap<PersonId, Option<Decimal>>,
) -> ResultEngine<BTreeMap<PersonId, Money>> {
    let total = match line_item.split_type {
        SplitType::Shares => total_shares(entries)?,
        SplitType::Value => Decimal::ZERO,
    };

    entries
        .iter()
        .filter_map(|(person_id, value)| value.map(|value| (*person_id, value)))
        .map(|(person_id, value)| Ok((person_id, resolve_amount(line_item, value, total)?)))
        .collect()
}

/// Split values that divide `value` evenly between `people`.
///
/// `Shares` gives everyone one share. `Value` gives everyone `value / people` rounded to
/// cents; the remainder is not redistributed, so the sum may be off by a few cents.
#[must_use]
pub fn even_allocation(
    value: Money,
    people: &[Person],
    split_type: SplitType,
) -> BTreeMap<PersonId, Decimal> {
    if people.is_empty() {
        return BTreeMap::new();
    }

    let per_person = match split_type {
        SplitType::Shares => Decimal::ONE,
        SplitType::Value => {
            Money::rounded(value.amount() / Decimal::from(people.len())).amount()
        }
    };

    people
        .iter()
        .map(|person| (person.id, per_person))
        .collect()
}

/// Returns `true` when `claims` cover exactly `total_people` people with the same split value.
///
/// Absent split values count as zero.
#[must_use]
pub fn is_even_allocation(claims: &[PersonClaim], total_people: usize) -> bool {
    if claims.is_empty() || claims.len() != total_people {
        return false;
    }
    let first = claims[0].split_value.unwrap_or_default();
    claims
        .iter()
        .all(|claim| claim.split_value.unwrap_or_default() == first)
}

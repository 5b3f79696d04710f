mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;

use common::{bill, committed_claim, line_item, person};
use engine::{
    Bill, BillId, DraftSplits, LineItemId, Money, PersonClaim, PersonId, SplitType,
    SplitWorkspace, net_balance, quick_valid, share_split, total_owed, total_paid, validate,
};

/// Non-negative amount with cents.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Draft value: absent, or any signed decimal with up to 3 fractional digits.
fn draft_value_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        1 => Just(None),
        4 => (-50_000i64..100_000i64, 0u32..4u32).prop_map(|(m, s)| Some(Decimal::new(m, s))),
    ]
}

fn split_type_strategy() -> impl Strategy<Value = SplitType> {
    prop_oneof![Just(SplitType::Shares), Just(SplitType::Value)]
}

/// Edits as (line item index, person id, value).
fn edits_strategy() -> impl Strategy<Value = Vec<(usize, i64, Option<Decimal>)>> {
    prop::collection::vec((0usize..3, 1i64..5, draft_value_strategy()), 0..20)
}

fn bill_strategy() -> impl Strategy<Value = Bill> {
    prop::collection::vec(
        (
            amount_strategy(),
            split_type_strategy(),
            prop::collection::vec((1i64..5, draft_value_strategy()), 0..4),
        ),
        1..4,
    )
    .prop_map(|items| {
        let line_items = items
            .into_iter()
            .enumerate()
            .map(|(index, (value, split_type, claims))| {
                let mut item = line_item(index as i64 + 1, "Item", value, split_type);
                item.person_claims = claims
                    .into_iter()
                    .map(|(person_id, split_value)| PersonClaim::new(PersonId::new(person_id), split_value))
                    .collect();
                item
            })
            .collect();
        bill(1, None, line_items)
    })
}

fn apply_edits(workspace: &mut SplitWorkspace, edits: &[(usize, i64, Option<Decimal>)]) {
    let ids: Vec<LineItemId> = workspace
        .bill()
        .map(|bill| bill.line_items.iter().map(|item| item.id).collect())
        .unwrap_or_default();
    for (index, person_id, value) in edits {
        let line_item_id = ids[index % ids.len()];
        workspace
            .set_entry(line_item_id, PersonId::new(*person_id), *value)
            .unwrap();
    }
}

proptest! {
    #[test]
    fn validate_rejects_any_value_sum_over_line_value(
        bill in bill_strategy(),
        edits in edits_strategy(),
    ) {
        let mut workspace = SplitWorkspace::new(bill.clone());
        apply_edits(&mut workspace, &edits);

        let over = bill.line_items.iter().any(|item| {
            item.split_type == SplitType::Value
                && workspace
                    .drafts()
                    .entries(item.id)
                    .is_some_and(|entries| {
                        entries.values().flatten().copied().sum::<Decimal>() > item.value.amount()
                    })
        });

        if over {
            prop_assert!(!validate(&bill, workspace.drafts()).is_valid());
            prop_assert!(!quick_valid(&bill, workspace.drafts()));
        } else {
            prop_assert!(quick_valid(&bill, workspace.drafts()));
        }
    }

    #[test]
    fn reset_always_matches_a_fresh_seed(
        bill in bill_strategy(),
        edits in edits_strategy(),
    ) {
        let mut workspace = SplitWorkspace::new(bill.clone());
        apply_edits(&mut workspace, &edits);
        workspace.reset();
        prop_assert_eq!(workspace.drafts(), &DraftSplits::from_bill(&bill));
        workspace.reset();
        prop_assert_eq!(workspace.drafts(), &DraftSplits::from_bill(&bill));
    }

    #[test]
    fn share_split_with_zero_total_is_zero(
        value in amount_strategy(),
        shares in (-1_000i64..1_000i64).prop_map(Decimal::from),
    ) {
        prop_assert_eq!(share_split(Money::new(value), shares, Decimal::ZERO), Ok(Money::ZERO));
    }

    #[test]
    fn net_balance_is_rounded_paid_minus_owed(
        bills in prop::collection::vec(
            (
                prop::option::of(1i64..4),
                prop::collection::vec((1i64..4, amount_strategy()), 0..5),
            ),
            0..5,
        ),
        person_id in 1i64..4,
    ) {
        let bills: Vec<Bill> = bills
            .into_iter()
            .enumerate()
            .map(|(index, (payer, claims))| {
                let mut item = line_item(1, "Item", Decimal::new(1_000, 2), SplitType::Value);
                item.person_claims = claims
                    .into_iter()
                    .map(|(claimant, amount)| committed_claim(claimant, amount, amount))
                    .collect();
                bill(index as i64 + 1, payer.map(|id| person(id, "Payer")), vec![item])
            })
            .collect();
        let person_id = PersonId::new(person_id);

        let expected = (total_paid(&bills, person_id) - total_owed(&bills, person_id)).round();
        prop_assert_eq!(net_balance(&bills, person_id), expected);
    }

    #[test]
    fn submission_never_carries_absent_zero_or_negative_values(
        bill in bill_strategy(),
        edits in edits_strategy(),
    ) {
        let mut workspace = SplitWorkspace::new(bill.clone());
        apply_edits(&mut workspace, &edits);

        if let Ok(payload) = workspace.prepare_submission(BillId::new(1)) {
            for line_item_split in &payload.line_item_splits {
                prop_assert!(!line_item_split.person_splits.is_empty());
                for person_split in &line_item_split.person_splits {
                    prop_assert!(person_split.split_value > Decimal::ZERO);
                    let draft = workspace
                        .drafts()
                        .get(line_item_split.line_item_id, person_split.person_id);
                    prop_assert_eq!(draft, Some(Some(person_split.split_value)));
                }
            }
        } else {
            prop_assert!(!workspace.quick_valid());
        }
    }
}

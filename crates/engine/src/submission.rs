//! Normalised payload sent to the remote allocation service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Bill, BillId, DraftSplits, LineItemId, PersonId};

/// Whether the user split the bill evenly or by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    Even,
    Uneven,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSplit {
    pub person_id: PersonId,
    pub split_value: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemSplit {
    pub line_item_id: LineItemId,
    pub person_splits: Vec<PersonSplit>,
}

/// Request body of the submit-splits call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSubmission {
    pub bill_id: BillId,
    pub split_mode: SplitMode,
    pub line_item_splits: Vec<LineItemSplit>,
}

/// Builds the submission payload from `drafts`, in the bill's line item order.
///
/// Only strictly positive values are sent: absent, zero and negative entries mean "no claim"
/// and are dropped, and line items left without any person are dropped too.
#[must_use]
pub fn build_submission(
    bill_id: BillId,
    bill: &Bill,
    drafts: &DraftSplits,
    split_mode: SplitMode,
) -> SplitSubmission {
    let line_item_splits = bill
        .line_items
        .iter()
        .filter_map(|line_item| {
            let entries = drafts.entries(line_item.id)?;
            let person_splits: Vec<PersonSplit> = entries
                .iter()
                .filter_map(|(person_id, value)| match value {
                    Some(value) if *value > Decimal::ZERO => Some(PersonSplit {
                        person_id: *person_id,
                        split_value: *value,
                    }),
                    _ => None,
                })
                .collect();
            (!person_splits.is_empty()).then_some(LineItemSplit {
                line_item_id: line_item.id,
                person_splits,
            })
        })
        .collect();

    SplitSubmission {
        bill_id,
        split_mode,
        line_item_splits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BillStatus, Currency, LineItem, Money, SplitType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bill() -> Bill {
        Bill {
            id: BillId::new(3),
            description: "Groceries".to_string(),
            currency: Currency::Usd,
            status: BillStatus::Open,
            date: NaiveDate::default(),
            is_closed: false,
            creator: None,
            payer: None,
            total_amount: Money::new(dec!(20)),
            line_items: vec![
                LineItem::new(LineItemId::new(1), "Bread", Money::new(dec!(5)), SplitType::Shares),
                LineItem::new(LineItemId::new(2), "Cheese", Money::new(dec!(15)), SplitType::Value),
            ],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn drops_absent_zero_and_negative_entries() {
        let mut drafts = DraftSplits::default();
        drafts.set_entry(LineItemId::new(1), PersonId::new(1), Some(dec!(1)));
        drafts.set_entry(LineItemId::new(1), PersonId::new(2), None);
        drafts.set_entry(LineItemId::new(1), PersonId::new(3), Some(dec!(0)));
        drafts.set_entry(LineItemId::new(1), PersonId::new(4), Some(dec!(-2)));
        drafts.set_entry(LineItemId::new(2), PersonId::new(2), Some(dec!(0)));

        let payload = build_submission(BillId::new(3), &bill(), &drafts, SplitMode::Uneven);

        assert_eq!(payload.line_item_splits.len(), 1);
        assert_eq!(payload.line_item_splits[0].line_item_id, LineItemId::new(1));
        assert_eq!(
            payload.line_item_splits[0].person_splits,
            vec![PersonSplit {
                person_id: PersonId::new(1),
                split_value: dec!(1),
            }]
        );
    }

    #[test]
    fn serializes_to_service_shape() {
        let mut drafts = DraftSplits::default();
        drafts.set_entry(LineItemId::new(2), PersonId::new(5), Some(dec!(7.50)));
        let payload = build_submission(BillId::new(3), &bill(), &drafts, SplitMode::Even);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["bill_id"], 3);
        assert_eq!(json["split_mode"], "even");
        assert_eq!(json["line_item_splits"][0]["line_item_id"], 2);
        assert_eq!(json["line_item_splits"][0]["person_splits"][0]["person_id"], 5);
        assert_eq!(
            json["line_item_splits"][0]["person_splits"][0]["split_value"],
            "7.50"
        );
    }

    #[test]
    fn drafts_for_unknown_line_items_are_ignored() {
        let mut drafts = DraftSplits::default();
        drafts.set_entry(LineItemId::new(99), PersonId::new(1), Some(dec!(1)));
        let payload = build_submission(BillId::new(3), &bill(), &drafts, SplitMode::Even);
        assert!(payload.line_item_splits.is_empty());
    }
}

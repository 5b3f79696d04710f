use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{Bill, LineItemId, PersonId};

/// Draft entries of a single line item: person -> split value (`None` = not allocated).
pub type DraftEntries = BTreeMap<PersonId, Option<Decimal>>;

/// Uncommitted split values, keyed by line item then person.
///
/// Never a source of truth: it is always rebuilt from a bill's committed claims with
/// [`DraftSplits::seed`]. Iteration is ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftSplits {
    line_items: BTreeMap<LineItemId, DraftEntries>,
}

impl DraftSplits {
    /// Builds drafts from the committed claims of `bill`.
    pub fn from_bill(bill: &Bill) -> Self {
        let mut drafts = Self::default();
        drafts.seed(bill);
        drafts
    }

    /// Discards everything and copies every claim's split value verbatim.
    ///
    /// Every line item of `bill` gets an entry map, even when it has no claims yet.
    pub fn seed(&mut self, bill: &Bill) {
        self.line_items = bill
            .line_items
            .iter()
            .map(|item| {
                let entries = item
                    .person_claims
                    .iter()
                    .map(|claim| (claim.person_id, claim.split_value))
                    .collect();
                (item.id, entries)
            })
            .collect();
    }

    /// Writes the split value of `person_id` on `line_item_id`, creating the line item's map on
    /// first write.
    pub fn set_entry(&mut self, line_item_id: LineItemId, person_id: PersonId, value: Option<Decimal>) {
        self.line_items
            .entry(line_item_id)
            .or_default()
            .insert(person_id, value);
    }

    /// Returns the entries of `line_item_id`, if any were seeded or written.
    pub fn entries(&self, line_item_id: LineItemId) -> Option<&DraftEntries> {
        self.line_items.get(&line_item_id)
    }

    /// Returns the draft value of one person. The outer `Option` tells whether an entry exists.
    pub fn get(&self, line_item_id: LineItemId, person_id: PersonId) -> Option<Option<Decimal>> {
        self.line_items
            .get(&line_item_id)
            .and_then(|entries| entries.get(&person_id))
            .copied()
    }

    pub fn clear(&mut self) {
        self.line_items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LineItemId, &DraftEntries)> {
        self.line_items.iter()
    }
}

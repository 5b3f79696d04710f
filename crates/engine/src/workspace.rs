use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    Bill, BillId, DraftSplits, EngineError, LineItem, LineItemId, Money, Person, PersonId,
    ResultEngine, SplitMode, SplitSubmission, ValidationReport,
    split::{even_allocation, is_even_allocation, preview_allocation},
    submission::build_submission,
    validation,
};

/// Editing session over one bill.
///
/// Owns the active bill, its uncommitted drafts and the chosen split mode. The drafts are
/// always derived from the active bill: swapping or resetting the bill reseeds them, so no
/// entry of a previous bill survives.
#[derive(Clone, Debug, Default)]
pub struct SplitWorkspace {
    bill: Option<Bill>,
    drafts: DraftSplits,
    split_mode: SplitMode,
}

impl SplitWorkspace {
    /// Starts a workspace already seeded from `bill`.
    pub fn new(bill: Bill) -> Self {
        let mut workspace = Self::default();
        workspace.swap_active_bill(Some(bill));
        workspace
    }

    pub fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    pub fn drafts(&self) -> &DraftSplits {
        &self.drafts
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    pub fn set_split_mode(&mut self, split_mode: SplitMode) {
        self.split_mode = split_mode;
    }

    /// Makes `bill` the active bill and reseeds the drafts from it, or clears everything.
    pub fn swap_active_bill(&mut self, bill: Option<Bill>) {
        match bill {
            Some(bill) => {
                debug!(bill_id = %bill.id, "seeding split drafts");
                self.drafts.seed(&bill);
                self.bill = Some(bill);
            }
            None => {
                debug!("clearing split drafts");
                self.drafts.clear();
                self.bill = None;
            }
        }
    }

    /// Discards every edit and reseeds from the active bill. No-op without an active bill.
    pub fn reset(&mut self) {
        if let Some(bill) = &self.bill {
            debug!(bill_id = %bill.id, "resetting split drafts");
            self.drafts.seed(bill);
        }
    }

    fn active(&self) -> ResultEngine<&Bill> {
        self.bill.as_ref().ok_or(EngineError::NoActiveBill)
    }

    fn line_item(&self, line_item_id: LineItemId) -> ResultEngine<&LineItem> {
        self.active()?
            .line_item(line_item_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("line item {line_item_id}")))
    }

    /// Edits one draft value. The line item must belong to the active bill.
    pub fn set_entry(
        &mut self,
        line_item_id: LineItemId,
        person_id: PersonId,
        value: Option<Decimal>,
    ) -> ResultEngine<()> {
        self.line_item(line_item_id)?;
        self.drafts.set_entry(line_item_id, person_id, value);
        Ok(())
    }

    /// Overwrites the drafts of one line item with an even split between `people`.
    ///
    /// Entries of people not listed are left untouched.
    pub fn apply_even_split(&mut self, line_item_id: LineItemId, people: &[Person]) -> ResultEngine<()> {
        let line_item = self.line_item(line_item_id)?;
        let even = even_allocation(line_item.value, people, line_item.split_type);
        for (person_id, value) in even {
            self.drafts.set_entry(line_item_id, person_id, Some(value));
        }
        Ok(())
    }

    /// Live amounts per person for one line item, from the current drafts.
    pub fn preview(&self, line_item_id: LineItemId) -> ResultEngine<BTreeMap<PersonId, Money>> {
        let line_item = self.line_item(line_item_id)?;
        match self.drafts.entries(line_item_id) {
            Some(entries) => preview_allocation(line_item, entries),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Whether the committed claims of a line item split it evenly between `total_people`.
    pub fn is_evenly_split(&self, line_item_id: LineItemId, total_people: usize) -> ResultEngine<bool> {
        let line_item = self.line_item(line_item_id)?;
        Ok(is_even_allocation(&line_item.person_claims, total_people))
    }

    pub fn validate(&self) -> ResultEngine<ValidationReport> {
        Ok(validation::validate(self.active()?, &self.drafts))
    }

    /// `false` without an active bill.
    #[must_use]
    pub fn quick_valid(&self) -> bool {
        self.bill
            .as_ref()
            .is_some_and(|bill| validation::quick_valid(bill, &self.drafts))
    }

    /// Checks the submission preconditions and builds the payload for `bill_id`.
    ///
    /// Fails before anything is sent when no bill is active, when `bill_id` is not the active
    /// bill or when the drafts break the value-sum rule.
    pub fn prepare_submission(&self, bill_id: BillId) -> ResultEngine<SplitSubmission> {
        let bill = self.active()?;
        if bill.id != bill_id {
            return Err(EngineError::BillMismatch {
                active: bill.id,
                requested: bill_id,
            });
        }
        if !validation::quick_valid(bill, &self.drafts) {
            let report = validation::evaluate(bill, &self.drafts, validation::Scope::SumOnly);
            return Err(EngineError::InvalidSplits(report.errors()));
        }
        Ok(build_submission(bill_id, bill, &self.drafts, self.split_mode))
    }

    /// Replaces the active bill with the server-confirmed one and reseeds the drafts.
    pub fn commit(&mut self, confirmed: Bill) {
        self.swap_active_bill(Some(confirmed));
    }

    /// Committed amount owed by `person_id` on the active bill.
    pub fn person_total_owed(&self, person_id: PersonId) -> Money {
        self.bill
            .as_ref()
            .map(|bill| crate::balances::total_owed(std::slice::from_ref(bill), person_id))
            .unwrap_or_default()
    }
}

use std::collections::BTreeMap;

use api_types::bill::BillNew;
use engine::{
    Bill, BillId, BillSummary, LineItemId, Money, Person, PersonId, SplitMode, SplitWorkspace,
    TabId, ValidationReport,
};
use rust_decimal::Decimal;
use tracing::info;

use super::finish;
use crate::{client::Client, error::Result};

/// Bills of a tab and the editing session over the current one.
#[derive(Debug)]
pub struct BillStore {
    client: Client,
    bills: Vec<BillSummary>,
    workspace: SplitWorkspace,
    loading: bool,
    error: Option<String>,
}

impl BillStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            bills: Vec::new(),
            workspace: SplitWorkspace::default(),
            loading: false,
            error: None,
        }
    }

    pub fn bills(&self) -> &[BillSummary] {
        &self.bills
    }

    pub fn current_bill(&self) -> Option<&Bill> {
        self.workspace.bill()
    }

    pub fn workspace(&self) -> &SplitWorkspace {
        &self.workspace
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub async fn fetch_bills(&mut self, tab: Option<TabId>) -> Result<&[BillSummary]> {
        self.loading = true;
        self.error = None;
        let result = self.client.bills(tab).await;
        self.loading = false;

        self.bills = finish(&mut self.error, result)?;
        Ok(&self.bills)
    }

    /// Loads a bill, makes it current and seeds the drafts from its claims.
    pub async fn fetch_bill(&mut self, id: BillId) -> Result<&Bill> {
        self.loading = true;
        self.error = None;
        let result = self.client.bill(id).await;
        self.loading = false;

        let bill = finish(&mut self.error, result)?;
        info!(bill_id = %bill.id, line_items = bill.line_items.len(), "bill loaded");
        self.refresh_summary(&bill);
        self.workspace.swap_active_bill(Some(bill));
        self.workspace.bill().ok_or_else(|| engine::EngineError::NoActiveBill.into())
    }

    /// Creates a bill, puts it first in the list and makes it current.
    pub async fn create_bill(&mut self, bill: &BillNew) -> Result<&Bill> {
        self.loading = true;
        self.error = None;
        let result = self.client.create_bill(bill).await;
        self.loading = false;

        let created = finish(&mut self.error, result)?;
        info!(bill_id = %created.id, tab_id = %bill.tab_id, "bill created");
        self.bills.insert(0, BillSummary::from(&created));
        self.workspace.swap_active_bill(Some(created));
        self.workspace.bill().ok_or_else(|| engine::EngineError::NoActiveBill.into())
    }

    /// Submits the drafts of the current bill.
    ///
    /// The preconditions are checked locally first. On success the current bill is replaced by
    /// the service's copy and the drafts are reseeded; on failure nothing changes and the drafts
    /// stay as they were.
    pub async fn submit_splits(&mut self, bill_id: BillId) -> Result<&Bill> {
        let payload = self.workspace.prepare_submission(bill_id)?;

        self.loading = true;
        self.error = None;
        let result = self.client.submit_splits(bill_id, &payload).await;
        self.loading = false;

        let confirmed = finish(&mut self.error, result)?;
        info!(bill_id = %confirmed.id, status = ?confirmed.status, "splits submitted");
        self.refresh_summary(&confirmed);
        self.workspace.commit(confirmed);
        self.workspace.bill().ok_or_else(|| engine::EngineError::NoActiveBill.into())
    }

    fn refresh_summary(&mut self, bill: &Bill) {
        if let Some(summary) = self.bills.iter_mut().find(|summary| summary.id == bill.id) {
            *summary = BillSummary::from(bill);
        }
    }

    pub fn set_current_bill(&mut self, bill: Option<Bill>) {
        self.workspace.swap_active_bill(bill);
    }

    pub fn set_split_mode(&mut self, split_mode: SplitMode) {
        self.workspace.set_split_mode(split_mode);
    }

    pub fn update_draft_split(
        &mut self,
        line_item_id: LineItemId,
        person_id: PersonId,
        value: Option<Decimal>,
    ) -> Result<()> {
        Ok(self.workspace.set_entry(line_item_id, person_id, value)?)
    }

    pub fn apply_even_split(&mut self, line_item_id: LineItemId, people: &[Person]) -> Result<()> {
        Ok(self.workspace.apply_even_split(line_item_id, people)?)
    }

    pub fn reset_drafts(&mut self) {
        self.workspace.reset();
    }

    pub fn validate(&self) -> Result<ValidationReport> {
        Ok(self.workspace.validate()?)
    }

    pub fn is_valid_split(&self) -> bool {
        self.workspace.quick_valid()
    }

    pub fn preview(&self, line_item_id: LineItemId) -> Result<BTreeMap<PersonId, Money>> {
        Ok(self.workspace.preview(line_item_id)?)
    }

    pub fn person_total_owed(&self, person_id: PersonId) -> Money {
        self.workspace.person_total_owed(person_id)
    }
}

use std::collections::BTreeMap;

use api_types::tab::{Tab, TabListItem, TabNew};
use engine::{Bill, Money, Person, PersonId, Settlement, SettlementId, TabId};
use tracing::{info, warn};

use super::finish;
use crate::{client::Client, error::Result};

/// Tabs and the one currently open.
#[derive(Debug)]
pub struct TabStore {
    client: Client,
    tabs: Vec<TabListItem>,
    current_tab: Option<Tab>,
    loading: bool,
    error: Option<String>,
}

impl TabStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tabs: Vec::new(),
            current_tab: None,
            loading: false,
            error: None,
        }
    }

    pub fn tabs(&self) -> &[TabListItem] {
        &self.tabs
    }

    pub fn tab_by_id(&self, id: TabId) -> Option<&TabListItem> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current_tab.as_ref()
    }

    /// People of the current tab, empty when none is open.
    pub fn people(&self) -> &[Person] {
        self.current_tab
            .as_ref()
            .map(|tab| tab.people.as_slice())
            .unwrap_or_default()
    }

    pub fn set_current_tab(&mut self, tab: Option<Tab>) {
        self.current_tab = tab;
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

    pub async fn fetch_tabs(&mut self) -> Result<&[TabListItem]> {
        self.loading = true;
        self.error = None;
        let result = self.client.tabs().await;
        self.loading = false;

        self.tabs = finish(&mut self.error, result)?;
        Ok(&self.tabs)
    }

    /// Opens a tab and refreshes its entry in the list.
    pub async fn fetch_tab(&mut self, id: TabId) -> Result<&Tab> {
        self.loading = true;
        self.error = None;
        let result = self.client.tab(id).await;
        self.loading = false;

        let tab = finish(&mut self.error, result)?;
        if let Some(item) = self.tabs.iter_mut().find(|item| item.id == tab.id) {
            *item = TabListItem::from(&tab);
        }
        Ok(self.current_tab.insert(tab))
    }

    /// Creates a tab, puts it first in the list and makes it current.
    pub async fn create_tab(&mut self, tab: &TabNew) -> Result<&Tab> {
        self.loading = true;
        self.error = None;
        let result = self.client.create_tab(tab).await;
        self.loading = false;

        let created = finish(&mut self.error, result)?;
        info!(tab_id = %created.id, people = created.people.len(), "tab created");
        self.tabs.insert(0, TabListItem::from(&created));
        Ok(self.current_tab.insert(created))
    }

    /// Deletes tab `id`, drops it from the list and closes it if it is current.
    ///
    /// Returns the service's `success` flag. Nothing changes locally when it is `false`.
    pub async fn delete_tab(&mut self, id: TabId) -> Result<bool> {
        self.loading = true;
        self.error = None;
        let result = self.client.delete_tab(id).await;
        self.loading = false;

        let deleted = finish(&mut self.error, result)?;
        if !deleted.success {
            warn!(tab_id = %id, "service did not delete the tab");
            return Ok(false);
        }
        info!(tab_id = %id, "tab deleted");
        self.tabs.retain(|tab| tab.id != id);
        if self.current_tab.as_ref().is_some_and(|tab| tab.id == id) {
            self.current_tab = None;
        }
        Ok(true)
    }

    /// Asks the service for the settlements of tab `id`.
    ///
    /// When `id` is the current tab, its settlements are replaced by the returned ones.
    pub async fn simplify(&mut self, id: TabId) -> Result<Vec<Settlement>> {
        self.loading = true;
        self.error = None;
        let result = self.client.simplify(id).await;
        self.loading = false;

        let simplified = finish(&mut self.error, result)?;
        info!(tab_id = %id, settlements = simplified.settlements.len(), "{}", simplified.message);
        if let Some(tab) = self.current_tab.as_mut().filter(|tab| tab.id == id) {
            tab.settlements = simplified.settlements.clone();
        }
        Ok(simplified.settlements)
    }

    /// Marks a settlement as paid and stores the service's copy.
    ///
    /// Balances are not recomputed and nothing is simplified again.
    pub async fn mark_settlement_paid(&mut self, id: SettlementId) -> Result<Settlement> {
        self.loading = true;
        self.error = None;
        let result = self.client.mark_settlement_paid(id).await;
        self.loading = false;

        let settlement = finish(&mut self.error, result)?;
        info!(settlement_id = %settlement.id, "settlement marked paid");
        if let Some(existing) = self
            .current_tab
            .as_mut()
            .and_then(|tab| tab.settlements.iter_mut().find(|s| s.id == settlement.id))
        {
            *existing = settlement.clone();
        }
        Ok(settlement)
    }

    /// Net balance of every person of the current tab over `bills`.
    pub fn net_balances(&self, bills: &[Bill]) -> BTreeMap<PersonId, Money> {
        engine::net_balances(bills, self.people().iter().map(|person| person.id))
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BillId, ClaimId, Currency, LineItemId, Money, Person, PersonId};

/// How a line item is divided between people.
///
/// The meaning of a claim's `split_value` depends on it:
/// - `Shares`: a share count, amounts are proportional to the total shares.
/// - `Value`: a fixed monetary amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    Shares,
    Value,
}

impl SplitType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shares => "shares",
            Self::Value => "value",
        }
    }
}

/// Lifecycle state of a bill as reported by the remote service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[default]
    Open,
    AllClaimed,
    AllPaid,
    Archived,
}

/// A person's committed allocation on a line item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonClaim {
    #[serde(default)]
    pub id: Option<ClaimId>,
    pub person_id: PersonId,
    #[serde(default)]
    pub person_name: String,
    /// Share count or fixed amount; `None` means not allocated yet.
    #[serde(default)]
    pub split_value: Option<Decimal>,
    /// Filled in by the remote service once the allocation is committed.
    #[serde(default)]
    pub calculated_amount: Option<Money>,
    #[serde(default)]
    pub has_claimed: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl PersonClaim {
    /// Builds an uncommitted claim for `person_id`.
    pub fn new(person_id: PersonId, split_value: Option<Decimal>) -> Self {
        Self {
            id: None,
            person_id,
            person_name: String::new(),
            split_value,
            calculated_amount: None,
            has_claimed: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

/// A single charge within a bill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub value: Money,
    pub split_type: SplitType,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub person_claims: Vec<PersonClaim>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl LineItem {
    pub fn new(
        id: LineItemId,
        description: impl Into<String>,
        value: Money,
        split_type: SplitType,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            value,
            split_type,
            is_closed: false,
            person_claims: Vec::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Returns the committed claim of `person_id`, if any.
    pub fn claim_of(&self, person_id: PersonId) -> Option<&PersonClaim> {
        self.person_claims
            .iter()
            .find(|claim| claim.person_id == person_id)
    }
}

/// Committed bill state. Never holds unsaved edits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub description: String,
    pub currency: Currency,
    #[serde(default)]
    pub status: BillStatus,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub creator: Option<Person>,
    /// Person who paid the whole bill.
    #[serde(rename = "paid_by", default)]
    pub payer: Option<Person>,
    pub total_amount: Money,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Bill {
    /// Returns the line item with `id`, if it belongs to this bill.
    pub fn line_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }

    /// Returns `true` when `person_id` paid this bill.
    #[must_use]
    pub fn paid_by(&self, person_id: PersonId) -> bool {
        self.payer
            .as_ref()
            .is_some_and(|payer| payer.id == person_id)
    }
}

/// List projection of a [`Bill`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    pub id: BillId,
    pub description: String,
    pub currency: Currency,
    #[serde(default)]
    pub status: BillStatus,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_closed: bool,
    pub total_amount: Money,
    #[serde(default)]
    pub created_at: String,
}

impl From<&Bill> for BillSummary {
    fn from(bill: &Bill) -> Self {
        Self {
            id: bill.id,
            description: bill.description.clone(),
            currency: bill.currency,
            status: bill.status,
            date: bill.date,
            is_closed: bill.is_closed,
            total_amount: bill.total_amount,
            created_at: bill.created_at.clone(),
        }
    }
}

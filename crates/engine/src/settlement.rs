use serde::{Deserialize, Serialize};

use crate::{Currency, Money, Person, SettlementId};

/// Payment between two people proposed by the remote simplifier.
///
/// The engine never creates these; it only displays them and forwards the mark-paid action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub from_person: Person,
    pub to_person: Person,
    pub amount: Money,
    pub currency: Currency,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

//! Bill splitting core.
//!
//! Holds the committed bill model, the draft workspace edited before submission, the split
//! resolver used for live previews, validation of draft values and the balance aggregator
//! fed to the remote settlement simplifier. Everything here is synchronous and free of I/O.

pub use balances::{net_balance, net_balances, total_owed, total_paid};
pub use bill::{Bill, BillStatus, BillSummary, LineItem, PersonClaim, SplitType};
pub use currency::Currency;
pub use draft::{DraftEntries, DraftSplits};
pub use error::EngineError;
pub use ids::{BillId, ClaimId, LineItemId, PersonId, SettlementId, TabId, UserId};
pub use money::{MONEY_SCALE, Money, parse_decimal, round_money};
pub use person::{Person, User};
pub use settlement::Settlement;
pub use split::{
    even_allocation, is_even_allocation, preview_allocation, resolve_amount, share_split,
    total_shares,
};
pub use submission::{LineItemSplit, PersonSplit, SplitMode, SplitSubmission, build_submission};
pub use validation::{Scope, SplitViolation, ValidationReport, evaluate, quick_valid, validate};
pub use workspace::SplitWorkspace;

mod balances;
mod bill;
mod currency;
mod draft;
mod error;
mod ids;
mod money;
mod person;
mod settlement;
mod split;
mod submission;
mod validation;
mod workspace;

pub type ResultEngine<T> = Result<T, EngineError>;

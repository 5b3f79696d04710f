//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when a monetary input cannot be parsed.
//! - [`KeyNotFound`] thrown when a line item is not part of the active bill.
//! - [`NoActiveBill`] thrown when a workspace operation needs a loaded bill.
//! - [`InvalidSplits`] thrown when the drafts fail the submission gate.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`NoActiveBill`]: EngineError::NoActiveBill
//!  [`InvalidSplits`]: EngineError::InvalidSplits
use thiserror::Error;

use crate::BillId;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("No current bill selected")]
    NoActiveBill,
    #[error("Active bill is {active}, cannot submit splits for {requested}")]
    BillMismatch { active: BillId, requested: BillId },
    #[error("Invalid splits: {}", .0.join("; "))]
    InvalidSplits(Vec<String>),
    #[error("Unsupported currency: {0}")]
    Currency(String),
}

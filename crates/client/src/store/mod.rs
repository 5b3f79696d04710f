//! Client-side state over the bill service.
//!
//! Each store owns a busy flag and the last remote error. A remote failure is kept as one
//! message until [`clear_error`](BillStore::clear_error) and is also returned to the caller;
//! nothing is retried. Local precondition failures are returned before any request and leave
//! both untouched.

mod auth;
mod bills;
mod tabs;

pub use auth::AuthStore;
pub use bills::BillStore;
pub use tabs::TabStore;

use crate::{client::ClientError, error::Result};

/// Ends a remote action: records the failure message in `error` and converts the result.
fn finish<T>(error: &mut Option<String>, result: std::result::Result<T, ClientError>) -> Result<T> {
    result.map_err(|err| {
        *error = Some(err.to_string());
        err.into()
    })
}

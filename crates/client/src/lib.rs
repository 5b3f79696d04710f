//! Command line client of the NinjaTab bill service.
//!
//! The bill splitting rules live in the `engine` crate; this crate talks to the service, keeps
//! the login session and holds the stores the front end reads from.

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use client::{Client, ClientError};
pub use config::AppConfig;
pub use error::{AppError, Result};

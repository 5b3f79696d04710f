use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/ninjatab.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address of the bill service, including the `/api` prefix.
    pub base_url: String,
    /// Where the login session is persisted.
    pub session_path: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            session_path: "config/ninjatab_session.json".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ninjatab", about = "Split bills with your tabs")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the session file path.
    #[arg(long, global = true)]
    pub session_path: Option<String>,
    /// Override log level.
    #[arg(long, global = true)]
    pub level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with an email address.
    Login { email: String },
    /// Forget the stored session.
    Logout,
    /// List tabs.
    Tabs,
    /// Create a tab.
    NewTab {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Three-letter currency code.
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Member as NAME or NAME:EMAIL.
        #[arg(long = "person", value_name = "NAME[:EMAIL]")]
        people: Vec<String>,
    },
    /// Delete a tab.
    DeleteTab { tab_id: i64 },
    /// Create a bill in a tab.
    NewBill {
        tab_id: i64,
        description: String,
        /// Person creating the bill.
        #[arg(long)]
        creator: i64,
        /// Person who paid, the creator when omitted.
        #[arg(long)]
        paid_by: Option<i64>,
        /// Defaults to the tab's currency.
        #[arg(long)]
        currency: Option<String>,
        /// Bill date as YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Line item as DESCRIPTION=VALUE, optionally suffixed with :shares or :value.
        #[arg(long = "item", value_name = "DESCRIPTION=VALUE[:TYPE]")]
        items: Vec<String>,
    },
    /// Show a bill with its line items, claims and draft preview.
    Bill {
        id: i64,
        /// Tab the bill belongs to. Enables the even-split flag.
        #[arg(long)]
        tab: Option<i64>,
    },
    /// Edit and submit the splits of a bill.
    Split {
        bill_id: i64,
        /// `even` or `uneven`.
        #[arg(long, default_value = "even")]
        mode: String,
        /// Draft value as LINE:PERSON=VALUE. An empty VALUE clears the entry.
        #[arg(long = "set", value_name = "LINE:PERSON=VALUE")]
        set: Vec<String>,
        /// Split a line item evenly between every person of the tab.
        #[arg(long = "even", value_name = "LINE")]
        even: Vec<i64>,
        /// Tab the bill belongs to, needed by --even and the even-split flag.
        #[arg(long)]
        tab: Option<i64>,
    },
    /// Net balance of every person of a tab.
    Balances { tab_id: i64 },
    /// Ask the service for the settlements of a tab.
    Simplify { tab_id: i64 },
    /// Mark a settlement as paid.
    Settle { settlement_id: i64 },
}

/// Builds the configuration: file, then `NINJATAB_*` variables, then command line overrides.
pub fn load(overrides: &Overrides) -> Result<AppConfig> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("NINJATAB"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &overrides.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(session_path) = &overrides.session_path {
        settings.session_path = session_path.clone();
    }
    if let Some(level) = &overrides.level {
        settings.level = level.clone();
    }

    Ok(settings)
}

use api_types::{
    bill::{BillNew, LineItemNew},
    tab::{PersonNew, TabNew},
};
use engine::{
    Bill, BillId, Currency, LineItemId, Money, PersonId, SettlementId, SplitMode, SplitType,
    SplitWorkspace, TabId, parse_decimal,
};
use ninjatab::{
    config::Command,
    error::{AppError, Result},
    store::{AuthStore, BillStore, TabStore},
};
use rust_decimal::Decimal;

pub async fn dispatch(command: Command, auth: &mut AuthStore) -> Result<()> {
    match command {
        Command::Login { email } => {
            let user = auth.login(&email).await?;
            println!("Logged in as {} <{}>", user.username, user.email);
        }
        Command::Logout => {
            auth.logout()?;
            println!("Logged out");
        }
        Command::Tabs => {
            let mut tabs = TabStore::new(auth.client().clone());
            for tab in tabs.fetch_tabs().await? {
                let settled = if tab.is_settled { "settled" } else { "open" };
                println!(
                    "{:>4}  {:<24} {}  {} bills  {settled}",
                    tab.id, tab.name, tab.default_currency, tab.bill_count
                );
            }
        }
        Command::NewTab {
            name,
            description,
            currency,
            people,
        } => {
            let tab = TabNew {
                name,
                description,
                default_currency: Currency::try_from(currency.as_str())?,
                people: people
                    .iter()
                    .map(|person| parse_person(person))
                    .collect::<Result<_>>()?,
            };
            let mut tabs = TabStore::new(auth.client().clone());
            let created = tabs.create_tab(&tab).await?;
            println!(
                "Created tab {} {} with {} people",
                created.id,
                created.name,
                created.people.len()
            );
        }
        Command::DeleteTab { tab_id } => {
            let mut tabs = TabStore::new(auth.client().clone());
            if tabs.delete_tab(TabId::new(tab_id)).await? {
                println!("Deleted tab {tab_id}");
            } else {
                println!("Tab {tab_id} was not deleted");
            }
        }
        Command::NewBill {
            tab_id,
            description,
            creator,
            paid_by,
            currency,
            date,
            items,
        } => {
            let tab_id = TabId::new(tab_id);
            let mut tabs = TabStore::new(auth.client().clone());
            let tab = tabs.fetch_tab(tab_id).await?;
            let currency = match currency {
                Some(code) => Currency::try_from(code.as_str())?,
                None => tab.default_currency,
            };
            let total_people = tab.people.len();

            let bill = BillNew {
                tab_id,
                description,
                currency,
                creator_id: PersonId::new(creator),
                paid_by_id: paid_by.map(PersonId::new),
                date,
                line_items: items
                    .iter()
                    .map(|item| parse_item(item))
                    .collect::<Result<_>>()?,
            };
            let mut bills = BillStore::new(auth.client().clone());
            bills.create_bill(&bill).await?;
            println!("Bill created");
            print_bill(&bills, Some(total_people))?;
        }
        Command::Bill { id, tab } => {
            let total_people = match tab {
                Some(tab) => {
                    let mut tabs = TabStore::new(auth.client().clone());
                    Some(tabs.fetch_tab(TabId::new(tab)).await?.people.len())
                }
                None => None,
            };
            let mut bills = BillStore::new(auth.client().clone());
            bills.fetch_bill(BillId::new(id)).await?;
            print_bill(&bills, total_people)?;
        }
        Command::Split {
            bill_id,
            mode,
            set,
            even,
            tab,
        } => {
            let bill_id = BillId::new(bill_id);
            let mut bills = BillStore::new(auth.client().clone());
            bills.fetch_bill(bill_id).await?;
            bills.set_split_mode(parse_mode(&mode)?);

            let mut tabs = TabStore::new(auth.client().clone());
            if let Some(tab) = tab {
                tabs.fetch_tab(TabId::new(tab)).await?;
            } else if !even.is_empty() {
                return Err(AppError::Usage("--even needs --tab".to_string()));
            }
            for line_item_id in even {
                bills.apply_even_split(LineItemId::new(line_item_id), tabs.people())?;
            }
            for edit in &set {
                let (line_item_id, person_id, value) = parse_edit(edit)?;
                bills.update_draft_split(line_item_id, person_id, value)?;
            }

            let report = bills.validate()?;
            if !report.is_valid() {
                return Err(engine::EngineError::InvalidSplits(report.errors()).into());
            }
            bills.submit_splits(bill_id).await?;
            println!("Splits submitted");
            let total_people = tabs.current_tab().map(|tab| tab.people.len());
            print_bill(&bills, total_people)?;
        }
        Command::Balances { tab_id } => {
            let tab_id = TabId::new(tab_id);
            let mut tabs = TabStore::new(auth.client().clone());
            let mut bills = BillStore::new(auth.client().clone());
            tabs.fetch_tab(tab_id).await?;

            let ids: Vec<BillId> = bills
                .fetch_bills(Some(tab_id))
                .await?
                .iter()
                .map(|summary| summary.id)
                .collect();
            let mut loaded: Vec<Bill> = Vec::with_capacity(ids.len());
            for id in ids {
                loaded.push(bills.fetch_bill(id).await?.clone());
            }

            let balances = tabs.net_balances(&loaded);
            for person in tabs.people() {
                let balance = balances.get(&person.id).copied().unwrap_or_default();
                println!("{:<24} {balance:>10}", person.name);
            }
        }
        Command::Simplify { tab_id } => {
            let tab_id = TabId::new(tab_id);
            let mut tabs = TabStore::new(auth.client().clone());
            tabs.fetch_tab(tab_id).await?;
            let settlements = tabs.simplify(tab_id).await?;
            if settlements.is_empty() {
                println!("Nothing to settle");
            }
            for settlement in settlements {
                println!(
                    "{:>4}  {} -> {}  {} {}",
                    settlement.id,
                    settlement.from_person.name,
                    settlement.to_person.name,
                    settlement.amount,
                    settlement.currency
                );
            }
        }
        Command::Settle { settlement_id } => {
            let mut tabs = TabStore::new(auth.client().clone());
            let settlement = tabs
                .mark_settlement_paid(SettlementId::new(settlement_id))
                .await?;
            println!(
                "Settlement {} marked paid: {} -> {} {} {}",
                settlement.id,
                settlement.from_person.name,
                settlement.to_person.name,
                settlement.amount,
                settlement.currency
            );
        }
    }
    Ok(())
}

/// Whether a line item is split evenly between every person of the tab.
///
/// Always `false` when the tab, and so its head count, is unknown.
fn is_even(
    workspace: &SplitWorkspace,
    line_item_id: LineItemId,
    total_people: Option<usize>,
) -> Result<bool> {
    match total_people {
        Some(total_people) => Ok(workspace.is_evenly_split(line_item_id, total_people)?),
        None => Ok(false),
    }
}

fn print_bill(bills: &BillStore, total_people: Option<usize>) -> Result<()> {
    let bill = bills
        .current_bill()
        .ok_or(engine::EngineError::NoActiveBill)?;
    println!(
        "{} {}  {} {}  {:?}",
        bill.id, bill.description, bill.total_amount, bill.currency, bill.status
    );
    if let Some(payer) = &bill.payer {
        println!("paid by {}", payer.name);
    }

    for item in &bill.line_items {
        let even = if is_even(bills.workspace(), item.id, total_people)? {
            "  even"
        } else {
            ""
        };
        println!(
            "  [{}] {}  {} ({}){even}",
            item.id,
            item.description,
            item.value,
            item.split_type.as_str()
        );
        for claim in &item.person_claims {
            let value = claim
                .split_value
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            let amount = claim
                .calculated_amount
                .map(|amount| amount.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "      {:<20} split {value:>8}  owes {amount:>8}",
                claim.person_name
            );
        }
        for (person_id, amount) in bills.preview(item.id)? {
            println!("      preview person {person_id}: {amount}");
        }
    }
    Ok(())
}

fn parse_mode(mode: &str) -> Result<SplitMode> {
    match mode.trim().to_ascii_lowercase().as_str() {
        "even" => Ok(SplitMode::Even),
        "uneven" => Ok(SplitMode::Uneven),
        other => Err(AppError::Usage(format!("unknown split mode: {other}"))),
    }
}

/// Parses `LINE:PERSON=VALUE`. An empty value clears the entry.
fn parse_edit(edit: &str) -> Result<(LineItemId, PersonId, Option<Decimal>)> {
    let usage = || AppError::Usage(format!("expected LINE:PERSON=VALUE, got {edit}"));
    let (key, value) = edit.split_once('=').ok_or_else(usage)?;
    let (line, person) = key.split_once(':').ok_or_else(usage)?;
    let line_item_id = line.parse::<LineItemId>().map_err(|_| usage())?;
    let person_id = person.parse::<PersonId>().map_err(|_| usage())?;
    let value = if value.trim().is_empty() {
        None
    } else {
        Some(parse_decimal(value, None)?)
    };
    Ok((line_item_id, person_id, value))
}

/// Parses `NAME` or `NAME:EMAIL`.
fn parse_person(person: &str) -> Result<PersonNew> {
    let (name, email) = match person.split_once(':') {
        Some((name, email)) => (name.trim(), Some(email.trim().to_string())),
        None => (person.trim(), None),
    };
    if name.is_empty() {
        return Err(AppError::Usage(format!("expected NAME[:EMAIL], got {person}")));
    }
    Ok(PersonNew {
        name: name.to_string(),
        email: email.filter(|email| !email.is_empty()),
    })
}

/// Parses `DESCRIPTION=VALUE[:shares|value]`. The split type defaults to shares.
fn parse_item(item: &str) -> Result<LineItemNew> {
    let usage = || AppError::Usage(format!("expected DESCRIPTION=VALUE[:TYPE], got {item}"));
    let (description, rest) = item.rsplit_once('=').ok_or_else(usage)?;
    let (value, split_type) = match rest.split_once(':') {
        Some((value, split_type)) => (value, split_type.trim().to_ascii_lowercase()),
        None => (rest, "shares".to_string()),
    };
    let split_type = match split_type.as_str() {
        "shares" => SplitType::Shares,
        "value" => SplitType::Value,
        _ => return Err(usage()),
    };
    if description.trim().is_empty() {
        return Err(usage());
    }
    Ok(LineItemNew {
        description: description.trim().to_string(),
        value: value.parse::<Money>()?,
        split_type,
        person_splits: Vec::new(),
    })
}

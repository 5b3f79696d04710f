#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use engine::{
    Bill, BillId, BillStatus, Currency, LineItem, LineItemId, Money, Person, PersonClaim, PersonId,
    SplitType,
};

pub fn person(id: i64, name: &str) -> Person {
    Person::new(PersonId::new(id), name)
}

pub fn line_item(id: i64, description: &str, value: Decimal, split_type: SplitType) -> LineItem {
    LineItem::new(LineItemId::new(id), description, Money::new(value), split_type)
}

pub fn committed_claim(person_id: i64, split_value: Decimal, amount: Decimal) -> PersonClaim {
    let mut claim = PersonClaim::new(PersonId::new(person_id), Some(split_value));
    claim.calculated_amount = Some(Money::new(amount));
    claim.has_claimed = true;
    claim
}

pub fn bill(id: i64, payer: Option<Person>, line_items: Vec<LineItem>) -> Bill {
    let total_amount = line_items.iter().map(|item| item.value).sum();
    Bill {
        id: BillId::new(id),
        description: format!("Bill {id}"),
        currency: Currency::Eur,
        status: BillStatus::Open,
        date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
        is_closed: false,
        creator: payer.clone(),
        payer,
        total_amount,
        line_items,
        created_at: "2025-03-01T12:00:00Z".to_string(),
        updated_at: "2025-03-01T12:00:00Z".to_string(),
    }
}

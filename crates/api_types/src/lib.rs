use serde::{Deserialize, Serialize};

pub use engine::Currency;

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
    }

    /// Account of the logged in user.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AuthUser {
        pub id: i64,
        pub username: String,
        #[serde(default)]
        pub email: String,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub access_token: String,
        pub refresh_token: String,
        pub user: AuthUser,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefreshRequest {
        pub refresh_token: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefreshResponse {
        pub access_token: String,
    }
}

pub mod tab {
    use super::*;
    use engine::{Person, Settlement, TabId};

    /// List projection of a tab.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TabListItem {
        pub id: TabId,
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub default_currency: Currency,
        #[serde(default)]
        pub is_settled: bool,
        #[serde(default)]
        pub bill_count: u32,
        #[serde(default)]
        pub created_at: String,
        #[serde(default)]
        pub updated_at: String,
    }

    /// Group of people sharing bills, with the settlements proposed so far.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Tab {
        pub id: TabId,
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub default_currency: Currency,
        #[serde(default)]
        pub is_settled: bool,
        #[serde(default)]
        pub bill_count: u32,
        #[serde(default)]
        pub people: Vec<Person>,
        #[serde(default)]
        pub settlements: Vec<Settlement>,
        #[serde(default)]
        pub created_at: String,
        #[serde(default)]
        pub updated_at: String,
    }

    impl From<&Tab> for TabListItem {
        fn from(tab: &Tab) -> Self {
            Self {
                id: tab.id,
                name: tab.name.clone(),
                description: tab.description.clone(),
                default_currency: tab.default_currency,
                is_settled: tab.is_settled,
                bill_count: tab.bill_count,
                created_at: tab.created_at.clone(),
                updated_at: tab.updated_at.clone(),
            }
        }
    }

    /// Person to add while creating a tab.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PersonNew {
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TabNew {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub default_currency: Currency,
        pub people: Vec<PersonNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TabDeleted {
        pub success: bool,
    }

    /// Response of the settlement simplifier.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SimplifyResult {
        pub settlements: Vec<Settlement>,
        #[serde(default)]
        pub message: String,
    }
}

pub mod bill {
    use super::*;
    use chrono::NaiveDate;
    use engine::{Money, PersonId, SplitType, TabId};
    use rust_decimal::Decimal;

    /// Initial claim on a new line item. Without a split value the server leaves it unresolved.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PersonSplitNew {
        pub person_id: PersonId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub split_value: Option<Decimal>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LineItemNew {
        pub description: String,
        pub value: Money,
        pub split_type: SplitType,
        #[serde(default)]
        pub person_splits: Vec<PersonSplitNew>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BillNew {
        pub tab_id: TabId,
        pub description: String,
        pub currency: Currency,
        pub creator_id: PersonId,
        /// Defaults to the creator on the server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub paid_by_id: Option<PersonId>,
        /// Defaults to today on the server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
        pub line_items: Vec<LineItemNew>,
    }
}

pub mod error {
    use super::*;

    /// Error body returned by the bill service.
    ///
    /// The service answers with `detail`; some proxies answer with `message`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorResponse {
        #[serde(default)]
        pub detail: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
    }

    impl ErrorResponse {
        /// Human-readable message, if the body carried one.
        pub fn into_message(self) -> Option<String> {
            self.detail
                .filter(|detail| !detail.is_empty())
                .or(self.message.filter(|message| !message.is_empty()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Currency,
        bill::{BillNew, LineItemNew, PersonSplitNew},
        error::ErrorResponse,
        tab::{PersonNew, Tab, TabNew},
    };
    use engine::{Money, PersonId, SplitType, TabId};
    use rust_decimal::Decimal;

    #[test]
    fn tab_deserializes_with_people_and_settlements() {
        let tab: Tab = serde_json::from_str(
            r#"{
                "id": 4,
                "name": "Trip",
                "description": "Lisbon",
                "default_currency": "EUR",
                "is_settled": false,
                "bill_count": 2,
                "people": [{"id": 1, "name": "Ada"}, {"id": 2, "name": "Bob"}],
                "settlements": [{
                    "id": 9,
                    "from_person": {"id": 2, "name": "Bob"},
                    "to_person": {"id": 1, "name": "Ada"},
                    "amount": "12.50",
                    "currency": "EUR"
                }],
                "created_at": "t0",
                "updated_at": "t1"
            }"#,
        )
        .unwrap();
        assert_eq!(tab.people.len(), 2);
        assert!(!tab.settlements[0].is_paid);
        assert_eq!(tab.settlements[0].amount.to_string(), "12.50");
    }

    #[test]
    fn error_message_prefers_detail() {
        let both: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Bill is closed", "message": "nope"}"#).unwrap();
        assert_eq!(both.into_message().as_deref(), Some("Bill is closed"));

        let message: ErrorResponse = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(message.into_message().as_deref(), Some("nope"));

        let empty: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_message(), None);
    }

    #[test]
    fn new_bill_omits_unset_optionals() {
        let bill = BillNew {
            tab_id: TabId::new(4),
            description: "Dinner".to_string(),
            currency: Currency::Eur,
            creator_id: PersonId::new(1),
            paid_by_id: None,
            date: None,
            line_items: vec![LineItemNew {
                description: "Pizza".to_string(),
                value: Money::new(Decimal::new(3000, 2)),
                split_type: SplitType::Value,
                person_splits: vec![PersonSplitNew {
                    person_id: PersonId::new(2),
                    split_value: None,
                }],
            }],
        };
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["tab_id"], 4);
        assert_eq!(json["currency"], "EUR");
        assert!(json.get("paid_by_id").is_none());
        assert!(json.get("date").is_none());
        assert_eq!(json["line_items"][0]["value"], "30.00");
        assert_eq!(json["line_items"][0]["split_type"], "value");
        assert!(json["line_items"][0]["person_splits"][0].get("split_value").is_none());
    }

    #[test]
    fn new_tab_people_carry_optional_email() {
        let tab = TabNew {
            name: "Trip".to_string(),
            description: String::new(),
            default_currency: Currency::Usd,
            people: vec![
                PersonNew {
                    name: "Ada".to_string(),
                    email: Some("ada@example.com".to_string()),
                },
                PersonNew {
                    name: "Bob".to_string(),
                    email: None,
                },
            ],
        };
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(json["people"][0]["email"], "ada@example.com");
        assert!(json["people"][1].get("email").is_none());
    }
}

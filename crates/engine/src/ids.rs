//! Integer identifiers assigned by the remote bill service.
//!
//! Each entity gets its own newtype so a person id can never be used where a line item id is
//! expected. On the wire they are plain integers.

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
                serde::Serialize, serde::Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                #[must_use]
                pub const fn new(id: i64) -> Self {
                    Self(id)
                }

                #[must_use]
                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl From<i64> for $name {
                fn from(value: i64) -> Self {
                    Self(value)
                }
            }

            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    core::fmt::Display::fmt(&self.0, f)
                }
            }

            impl core::str::FromStr for $name {
                type Err = core::num::ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.trim().parse().map(Self)
                }
            }
        )+
    };
}

id_type!(
    /// Person taking part in a tab.
    PersonId,
    /// Linked user account.
    UserId,
    /// Group of people sharing bills.
    TabId,
    BillId,
    LineItemId,
    /// Committed claim record.
    ClaimId,
    SettlementId,
);

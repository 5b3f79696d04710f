//! Constraint checks over draft splits.
//!
//! [`validate`] and [`quick_valid`] both go through [`evaluate`]; the submit gate and the
//! detailed error list apply the same value-sum rule.

use std::fmt;

use rust_decimal::Decimal;

use crate::{Bill, DraftSplits, LineItem, Money, SplitType};

/// Which constraints [`evaluate`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Value-sum rule and non-negativity.
    Full,
    /// Value-sum rule only.
    SumOnly,
}

/// A single broken constraint on one line item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitViolation {
    /// Fixed amounts on a `Value` line item add up to more than its value.
    ExceedsValue {
        line_item: String,
        total: Money,
        value: Money,
    },
    /// At least one draft value is below zero.
    Negative { line_item: String },
    /// The fixed amounts are too large to add up.
    OutOfRange { line_item: String },
}

impl fmt::Display for SplitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceedsValue {
                line_item,
                total,
                value,
            } => write!(
                f,
                "Line item \"{line_item}\": split total ({total}) exceeds value ({value})"
            ),
            Self::Negative { line_item } => {
                write!(f, "Line item \"{line_item}\": negative values are not allowed")
            }
            Self::OutOfRange { line_item } => {
                write!(f, "Line item \"{line_item}\": split values are too large")
            }
        }
    }
}

/// Outcome of a validation pass, in line item order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<SplitViolation>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable messages, one per violation.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Value-sum rule: allocated amounts on a `Value` line item must not exceed its value.
///
/// A sum that overflows `Decimal` breaks the rule as well.
fn value_sum_violation(line_item: &LineItem, allocated: &[Decimal]) -> Option<SplitViolation> {
    if line_item.split_type != SplitType::Value {
        return None;
    }
    let Some(total) = allocated
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
    else {
        return Some(SplitViolation::OutOfRange {
            line_item: line_item.description.clone(),
        });
    };
    (total > line_item.value.amount()).then(|| SplitViolation::ExceedsValue {
        line_item: line_item.description.clone(),
        total: Money::rounded(total),
        value: line_item.value,
    })
}

/// Checks every line item of `bill` that has at least one allocated draft value.
///
/// All line items are visited and every violation is collected.
#[must_use]
pub fn evaluate(bill: &Bill, drafts: &DraftSplits, scope: Scope) -> ValidationReport {
    let mut violations = Vec::new();

    for line_item in &bill.line_items {
        let Some(entries) = drafts.entries(line_item.id) else {
            continue;
        };
        let allocated: Vec<Decimal> = entries.values().flatten().copied().collect();
        if allocated.is_empty() {
            continue;
        }

        if let Some(violation) = value_sum_violation(line_item, &allocated) {
            violations.push(violation);
        }

        if scope == Scope::Full && allocated.iter().any(|value| *value < Decimal::ZERO) {
            violations.push(SplitViolation::Negative {
                line_item: line_item.description.clone(),
            });
        }
    }

    ValidationReport { violations }
}

/// Full validation: value sums and negative values.
#[must_use]
pub fn validate(bill: &Bill, drafts: &DraftSplits) -> ValidationReport {
    evaluate(bill, drafts, Scope::Full)
}

/// Cheap gate for enabling submission: value sums only.
#[must_use]
pub fn quick_valid(bill: &Bill, drafts: &DraftSplits) -> bool {
    evaluate(bill, drafts, Scope::SumOnly).is_valid()
}

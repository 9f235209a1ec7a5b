//! Cross-field consistency rules shared by generation and validation.

use serde::{Deserialize, Serialize};

use crate::value::{Row, Value};

/// A rule relating one or more fields of the same row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsistencyRule {
    /// `later` must not be before `earlier`.
    DateOrder {
        earlier: &'static str,
        later: &'static str,
        message: &'static str,
    },
    /// `field` must lie within `[min, max]`.
    Range {
        field: &'static str,
        min: f64,
        max: f64,
        message: &'static str,
    },
}

/// Rules evaluated for every generated or analyzed row.
pub const CONSISTENCY_RULES: &[ConsistencyRule] = &[
    ConsistencyRule::DateOrder {
        earlier: "admit_date",
        later: "discharge_date",
        message: "Discharge date before admit date",
    },
    ConsistencyRule::DateOrder {
        earlier: "order_date",
        later: "shipping_date",
        message: "Shipping date before order date",
    },
    ConsistencyRule::Range {
        field: "age",
        min: 0.0,
        max: 120.0,
        message: "Age out of reasonable range",
    },
    ConsistencyRule::Range {
        field: "credit_score",
        min: 300.0,
        max: 850.0,
        message: "Credit score out of valid range",
    },
];

impl ConsistencyRule {
    pub fn message(&self) -> &'static str {
        match self {
            Self::DateOrder { message, .. } | Self::Range { message, .. } => *message,
        }
    }

    /// Field names the rule reads, in the order they are reported.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::DateOrder { earlier, later, .. } => vec![*earlier, *later],
            Self::Range { field, .. } => vec![*field],
        }
    }

    /// Returns `true` when the row breaks the rule.
    ///
    /// Rules only fire when every referenced field is present with a usable
    /// value; missing, null, or mistyped cells are skipped.
    pub fn is_violated(&self, row: &Row) -> bool {
        match self {
            Self::DateOrder { earlier, later, .. } => {
                match (
                    row.get(earlier).and_then(Value::as_date),
                    row.get(later).and_then(Value::as_date),
                ) {
                    (Some(earlier), Some(later)) => later < earlier,
                    _ => false,
                }
            }
            Self::Range {
                field, min, max, ..
            } => row
                .get(field)
                .and_then(Value::as_f64)
                .is_some_and(|value| value < *min || value > *max),
        }
    }
}

/// Issues found in one generated row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    pub row: usize,
    pub issues: Vec<String>,
}

/// One rule violation with the fields it implicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub row: usize,
    pub issue: String,
    pub fields: Vec<String>,
}

/// Messages of every rule the row violates, in rule order.
pub fn check_row(row: &Row) -> Vec<String> {
    violated_rules(row)
        .map(|rule| rule.message().to_string())
        .collect()
}

/// Structured violations for a row at `index`.
pub fn check_row_detailed(index: usize, row: &Row) -> Vec<FieldIssue> {
    violated_rules(row)
        .map(|rule| FieldIssue {
            row: index,
            issue: rule.message().to_string(),
            fields: rule.fields().into_iter().map(str::to_string).collect(),
        })
        .collect()
}

fn violated_rules(row: &Row) -> impl Iterator<Item = &'static ConsistencyRule> + '_ {
    CONSISTENCY_RULES
        .iter()
        .filter(move |rule| rule.is_violated(row))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(value: &str) -> Value {
        Value::Date(NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default())
    }

    #[test]
    fn flags_discharge_before_admit() {
        let row = Row::new()
            .with("admit_date", date("2023-01-05"))
            .with("discharge_date", date("2023-01-01"));
        assert_eq!(check_row(&row), vec!["Discharge date before admit date"]);
    }

    #[test]
    fn skips_rules_with_missing_fields() {
        let row = Row::new()
            .with("discharge_date", date("2023-01-01"))
            .with("age", Value::Null);
        assert!(check_row(&row).is_empty());
    }

    #[test]
    fn range_rules_report_fields() {
        let row = Row::new().with("age", 130_i64).with("credit_score", 299.5);
        let issues = check_row_detailed(4, &row);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].fields, vec!["age"]);
        assert_eq!(issues[1].issue, "Credit score out of valid range");
        assert!(issues.iter().all(|issue| issue.row == 4));
    }
}

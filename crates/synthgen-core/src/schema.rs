use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level field schema for a synthetic dataset.
///
/// Field order follows the JSON document and defines the column order of
/// generated datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    #[serde(with = "ordered_fields")]
    #[schemars(with = "BTreeMap<String, FieldSpec>")]
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.spec)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named field of the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub spec: FieldSpec,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, spec: FieldSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// Generation metadata for a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Field kind name (e.g. `integer`, `email`, `choice`).
    #[serde(rename = "type")]
    pub field_type: String,
    /// Lower bound for numeric kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound for numeric kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Candidate values for `choice` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<serde_json::Value>>,
    /// Inclusive start date (`YYYY-MM-DD`) for `date` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`) for `date` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Decimal places kept for float kinds and noisy values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Maximum length for `text` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_options<I, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Resolve the declared type name into a known kind.
    pub fn kind(&self) -> Option<FieldKind> {
        self.field_type.parse().ok()
    }
}

/// Recognized field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Uuid,
    Name,
    Email,
    Phone,
    Address,
    Company,
    Text,
    City,
    State,
    Country,
    Zipcode,
    Integer,
    Float,
    Age,
    Salary,
    CreditScore,
    Price,
    Quantity,
    Rating,
    Transaction,
    AccountBalance,
    Choice,
    Date,
    Boolean,
    Gender,
    TransactionType,
    ProductCategory,
    Currency,
    EmploymentStatus,
    Education,
}

impl FieldKind {
    pub const ALL: &'static [FieldKind] = &[
        FieldKind::Uuid,
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Address,
        FieldKind::Company,
        FieldKind::Text,
        FieldKind::City,
        FieldKind::State,
        FieldKind::Country,
        FieldKind::Zipcode,
        FieldKind::Integer,
        FieldKind::Float,
        FieldKind::Age,
        FieldKind::Salary,
        FieldKind::CreditScore,
        FieldKind::Price,
        FieldKind::Quantity,
        FieldKind::Rating,
        FieldKind::Transaction,
        FieldKind::AccountBalance,
        FieldKind::Choice,
        FieldKind::Date,
        FieldKind::Boolean,
        FieldKind::Gender,
        FieldKind::TransactionType,
        FieldKind::ProductCategory,
        FieldKind::Currency,
        FieldKind::EmploymentStatus,
        FieldKind::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Company => "company",
            Self::Text => "text",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::Zipcode => "zipcode",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Age => "age",
            Self::Salary => "salary",
            Self::CreditScore => "credit_score",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Rating => "rating",
            Self::Transaction => "transaction",
            Self::AccountBalance => "account_balance",
            Self::Choice => "choice",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Gender => "gender",
            Self::TransactionType => "transaction_type",
            Self::ProductCategory => "product_category",
            Self::Currency => "currency",
            Self::EmploymentStatus => "employment_status",
            Self::Education => "education",
        }
    }

    /// Kinds that draw uniform integers from `[min, max]`.
    pub fn is_bounded_integer(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Age | Self::Salary | Self::CreditScore | Self::Quantity
        )
    }

    /// Kinds that draw uniform reals from `[min, max]`.
    pub fn is_bounded_float(self) -> bool {
        matches!(
            self,
            Self::Float | Self::Price | Self::Rating | Self::Transaction | Self::AccountBalance
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_bounded_integer() || self.is_bounded_float()
    }

    /// Default `(min, max)` used when the schema omits bounds.
    pub fn default_range(self) -> Option<(f64, f64)> {
        match self {
            Self::Integer => Some((1.0, 100.0)),
            Self::Age => Some((18.0, 85.0)),
            Self::Salary => Some((30_000.0, 150_000.0)),
            Self::CreditScore => Some((300.0, 850.0)),
            Self::Quantity => Some((1.0, 100.0)),
            Self::Float => Some((0.0, 1000.0)),
            Self::Transaction => Some((10.0, 10_000.0)),
            Self::AccountBalance => Some((-5000.0, 50_000.0)),
            Self::Price => Some((1.0, 1000.0)),
            Self::Rating => Some((1.0, 5.0)),
            _ => None,
        }
    }

    /// Default decimal places for float kinds.
    pub fn default_precision(self) -> u32 {
        match self {
            Self::Rating => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| value.to_string())
    }
}

mod ordered_fields {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::{FieldDef, FieldSpec};

    pub fn serialize<S>(fields: &[FieldDef], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(&field.name, &field.spec)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<FieldDef>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldsVisitor)
    }

    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<FieldDef>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of field name to field metadata")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, spec)) = access.next_entry::<String, FieldSpec>()? {
                if fields.iter().any(|field: &FieldDef| field.name == name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate field name: {name}"
                    )));
                }
                fields.push(FieldDef { name, spec });
            }
            Ok(fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>(), Ok(*kind));
        }
        assert_eq!("blob".parse::<FieldKind>(), Err("blob".to_string()));
    }

    #[test]
    fn numeric_kinds_have_default_ranges() {
        for kind in FieldKind::ALL.iter().filter(|kind| kind.is_numeric()) {
            let (min, max) = kind.default_range().expect("numeric kind has range");
            assert!(min < max, "{kind} default range is empty");
        }
    }
}

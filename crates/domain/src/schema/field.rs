//! Field kinds and the per-field checks the schema engine runs.

use serde_json::Value;

/// A named attribute a payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Structural type of a field, plus the constraints commands must meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// An integer with optional inclusive bounds.
    Int { min: Option<i64>, max: Option<i64> },
    /// A list of integers with an optional exact length.
    IntList { len: Option<usize> },
    /// A string; `non_empty` makes `""` count as missing.
    Text { non_empty: bool },
}

/// Why a present value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Violation {
    Missing,
    Constraint(String),
}

impl FieldKind {
    /// Tag used in schema descriptors.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Int { .. } => "int",
            Self::IntList { .. } => "[]int",
            Self::Text { .. } => "string",
        }
    }

    /// Decode the value into the Rust type backing this kind.
    ///
    /// Failure here means the payload has the wrong shape, not that it broke
    /// a business rule.
    pub(crate) fn check_shape(&self, value: &Value) -> Result<(), serde_json::Error> {
        match self {
            Self::Int { .. } => serde_json::from_value::<i64>(value.clone()).map(drop),
            Self::IntList { .. } => serde_json::from_value::<Vec<i64>>(value.clone()).map(drop),
            Self::Text { .. } => serde_json::from_value::<String>(value.clone()).map(drop),
        }
    }

    /// Check the value against this kind's constraints.
    pub(crate) fn check(&self, value: &Value) -> Result<(), Violation> {
        match *self {
            Self::Int { min, max } => {
                let Some(n) = value.as_i64() else {
                    return Err(Violation::Constraint("an integer".to_string()));
                };
                let below = min.is_some_and(|min| n < min);
                let above = max.is_some_and(|max| n > max);
                if below || above {
                    return Err(Violation::Constraint(describe_bounds(min, max)));
                }
                Ok(())
            }
            Self::IntList { len } => {
                let items = value
                    .as_array()
                    .filter(|items| items.iter().all(Value::is_i64));
                match (items, len) {
                    (None, Some(len)) => Err(Violation::Constraint(list_of(len))),
                    (None, None) => Err(Violation::Constraint("a list of integers".to_string())),
                    (Some(items), Some(len)) if items.len() != len => {
                        Err(Violation::Constraint(list_of(len)))
                    }
                    (Some(_), _) => Ok(()),
                }
            }
            Self::Text { non_empty } => match value.as_str() {
                None => Err(Violation::Constraint("a string".to_string())),
                Some("") if non_empty => Err(Violation::Missing),
                Some(_) => Ok(()),
            },
        }
    }
}

fn describe_bounds(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "an integer".to_string(),
    }
}

fn list_of(len: usize) -> String {
    format!("a list of exactly {len} integers")
}

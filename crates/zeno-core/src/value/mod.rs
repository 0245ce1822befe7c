mod compare;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use compare::{cmp_numeric, compare_eq, strict_order_cmp};

///
/// Value
///
/// Runtime scalar stored in a record column or carried as a predicate
/// literal. The dashboard's data tables only ever hold these five
/// kinds; datetimes arrive as text.
///
/// Null → the column is present but holds SQL NULL.
///
/// Untagged serde keeps records and predicate literals in their plain
/// JSON shape. `Int` is declared before `Float` so whole JSON numbers
/// deserialize as integers.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Null,
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Widen a numeric value to `f64` for cross-kind comparison.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Value {
    /// Render a value as a filter-text literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Null => write!(f, "null"),
            Self::Text(text) => {
                write!(f, "'")?;
                for ch in text.chars() {
                    if ch == '\'' || ch == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                write!(f, "'")
            }
        }
    }
}

/// Casefold text for ILIKE and case-insensitive comparison.
#[must_use]
pub fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    // Unicode fallback.
    input.to_lowercase()
}

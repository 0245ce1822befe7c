use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Filter expression AST
///
/// Pure representation of slice filters. This layer contains no
/// evaluation semantics and no schema knowledge; interpretation
/// happens in `eval`.
///

///
/// Operation
///
/// Closed set of predicate operations. The serde names are the wire
/// strings exchanged with the data-serving API and must stay
/// byte-for-byte stable.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Equal,
    Different,
    Gt,
    Lt,
    Lte,
    Gte,
    Like,
    Ilike,
    Regex,
}

impl Operation {
    /// Filter-text spelling of the operation.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::Different => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::Regex => "REGEX",
        }
    }
}

///
/// Predicate
///
/// Leaf node: one column/operation/value comparison.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub operation: Operation,
    pub value: Value,
}

impl Predicate {
    #[must_use]
    pub fn new(column: impl Into<String>, operation: Operation, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operation,
            value: value.into(),
        }
    }
}

///
/// FilterExpr
///
/// Boolean combination of predicates. `True` is the match-all
/// expression; the stored form of the "All instances" pseudo-slice is
/// an empty predicate group, which parses to this node.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FilterExpr {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Predicate(Predicate),
}

impl FilterExpr {
    #[must_use]
    pub const fn and(exprs: Vec<Self>) -> Self {
        Self::And(exprs)
    }

    #[must_use]
    pub const fn or(exprs: Vec<Self>) -> Self {
        Self::Or(exprs)
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Equal, value))
    }

    #[must_use]
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Different, value))
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Gt, value))
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Lt, value))
    }

    #[must_use]
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Lte, value))
    }

    #[must_use]
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Predicate(Predicate::new(column, Operation::Gte, value))
    }

    #[must_use]
    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Predicate(Predicate::new(
            column,
            Operation::Like,
            Value::Text(pattern.into()),
        ))
    }

    #[must_use]
    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Predicate(Predicate::new(
            column,
            Operation::Ilike,
            Value::Text(pattern.into()),
        ))
    }

    #[must_use]
    pub fn regex(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Predicate(Predicate::new(
            column,
            Operation::Regex,
            Value::Text(pattern.into()),
        ))
    }
}

impl BitAnd for FilterExpr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for FilterExpr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column,
            self.operation.symbol(),
            self.value
        )
    }
}

impl FilterExpr {
    /// Does this expression match every record, regardless of columns?
    fn is_match_all(&self) -> bool {
        match self {
            Self::True => true,
            Self::And(children) => children.iter().all(Self::is_match_all),
            Self::Or(children) => children.iter().any(Self::is_match_all),
            Self::Predicate(_) => false,
        }
    }
}

impl fmt::Display for FilterExpr {
    /// Render the expression back into stored filter text.
    ///
    /// The grammar has no match-all literal, so match-all renders as
    /// empty text and combinator children that render empty are
    /// skipped rather than leaving a dangling joiner. Remaining
    /// combinator children are parenthesized, which keeps the output
    /// unambiguous without tracking precedence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_joined(
            f: &mut fmt::Formatter<'_>,
            children: &[FilterExpr],
            joiner: &str,
        ) -> fmt::Result {
            let mut first = true;
            for child in children {
                let rendered = child.to_string();
                if rendered.is_empty() {
                    continue;
                }
                if !first {
                    write!(f, " {joiner} ")?;
                }
                first = false;
                match child {
                    FilterExpr::And(_) | FilterExpr::Or(_) => write!(f, "({rendered})")?,
                    _ => f.write_str(&rendered)?,
                }
            }
            Ok(())
        }

        match self {
            // Empty text parses back to the match-all expression.
            Self::True => Ok(()),
            // An OR with a match-all arm is itself match-all.
            Self::Or(children) if children.iter().any(Self::is_match_all) => Ok(()),
            Self::And(children) => write_joined(f, children, "AND"),
            Self::Or(children) => write_joined(f, children, "OR"),
            Self::Predicate(predicate) => write!(f, "{predicate}"),
        }
    }
}

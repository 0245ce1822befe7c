use crate::{
    filter::{
        ast::{FilterExpr, Operation, Predicate},
        diag::{DiagnosticSink, FilterDiagnostic, NullSink},
        like::like_match,
    },
    value::{Value, casefold, compare_eq, strict_order_cmp},
};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

///
/// FieldPresence
///
/// Result of attempting to read a column from a record during
/// predicate evaluation. This distinguishes between a missing column
/// and a present column whose value may be `Value::Null`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldPresence {
    /// Column exists and has a value (including `Value::Null`).
    Present(Value),
    /// Column is not present on the record.
    Missing,
}

///
/// Row
///
/// Abstraction over a record-like value that can expose columns by
/// name. This decouples predicate evaluation from concrete record
/// types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

///
/// Evaluate an expression against a single record.
///
/// This function performs **pure runtime evaluation**:
/// - no schema access
/// - no validation
///
/// Any undefined comparison simply evaluates to `false`; evaluation
/// never fails, so one bad predicate cannot halt a dashboard render.
///
#[must_use]
pub fn evaluate<R: Row + ?Sized>(expr: &FilterExpr, row: &R) -> bool {
    let mut pass = Pass::new(&NullSink);
    pass.eval(expr, row)
}

/// Stable filter: matching records in their original relative order.
///
/// The input is never mutated; each call is an independent pass with
/// its own regex cache, so concurrent invocations are safe.
#[must_use]
pub fn filter<'a, R: Row>(expr: &FilterExpr, records: &'a [R]) -> Vec<&'a R> {
    filter_with(expr, records, &NullSink)
}

/// `filter` with an injected diagnostic sink for out-of-band reporting
/// of regex compile failures.
#[must_use]
pub fn filter_with<'a, R: Row>(
    expr: &FilterExpr,
    records: &'a [R],
    sink: &dyn DiagnosticSink,
) -> Vec<&'a R> {
    let mut pass = Pass::new(sink);
    records
        .iter()
        .filter(|record| pass.eval(expr, *record))
        .collect()
}

///
/// Pass
///
/// State for one filter pass: the diagnostic sink and a per-pass regex
/// cache. Compiling once per distinct pattern also deduplicates the
/// compile-failure diagnostic.
///

struct Pass<'a> {
    sink: &'a dyn DiagnosticSink,
    patterns: HashMap<String, Option<Regex>>,
}

impl<'a> Pass<'a> {
    fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            sink,
            patterns: HashMap::new(),
        }
    }

    fn eval<R: Row + ?Sized>(&mut self, expr: &FilterExpr, row: &R) -> bool {
        match expr {
            FilterExpr::True => true,
            FilterExpr::And(children) => children.iter().all(|child| self.eval(child, row)),
            FilterExpr::Or(children) => children.iter().any(|child| self.eval(child, row)),
            FilterExpr::Predicate(predicate) => self.eval_predicate(predicate, row),
        }
    }

    ///
    /// Evaluate a single predicate against a record.
    ///
    /// Returns `false` if:
    /// - the column is missing
    /// - the comparison is not defined for the value pair
    /// - the regex pattern does not compile
    ///
    fn eval_predicate<R: Row + ?Sized>(&mut self, predicate: &Predicate, row: &R) -> bool {
        let Predicate {
            column,
            operation,
            value,
        } = predicate;

        let FieldPresence::Present(actual) = row.field(column) else {
            return false;
        };

        match operation {
            Operation::Equal => compare_eq(&actual, value).unwrap_or(false),
            Operation::Different => compare_eq(&actual, value).is_some_and(|eq| !eq),

            Operation::Lt => strict_order_cmp(&actual, value).is_some_and(Ordering::is_lt),
            Operation::Lte => strict_order_cmp(&actual, value).is_some_and(Ordering::is_le),
            Operation::Gt => strict_order_cmp(&actual, value).is_some_and(Ordering::is_gt),
            Operation::Gte => strict_order_cmp(&actual, value).is_some_and(Ordering::is_ge),

            Operation::Like => text_pair(&actual, value)
                .is_some_and(|(actual, pattern)| like_match(actual, pattern)),
            Operation::Ilike => text_pair(&actual, value).is_some_and(|(actual, pattern)| {
                like_match(&casefold(actual), &casefold(pattern))
            }),

            Operation::Regex => text_pair(&actual, value)
                .is_some_and(|(actual, pattern)| self.regex_match(column, actual, pattern)),
        }
    }

    /// Unanchored regex search over a text value.
    fn regex_match(&mut self, column: &str, actual: &str, pattern: &str) -> bool {
        let sink = self.sink;
        let compiled = self
            .patterns
            .entry(pattern.to_string())
            .or_insert_with(|| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(column, pattern, error = %err, "invalid regex in filter predicate");
                    sink.on_diagnostic(FilterDiagnostic::BadRegex {
                        column: column.to_string(),
                        pattern: pattern.to_string(),
                        message: err.to_string(),
                    });
                    None
                }
            });

        compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(actual))
    }
}

/// Both sides as text, or the comparison is undefined.
fn text_pair<'v>(actual: &'v Value, literal: &'v Value) -> Option<(&'v str, &'v str)> {
    Some((actual.as_text()?, literal.as_text()?))
}


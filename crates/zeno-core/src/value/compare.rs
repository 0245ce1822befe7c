use crate::value::Value;
use std::cmp::Ordering;

///
/// Value comparison semantics
///
/// Defines which runtime value comparisons are permitted and how they
/// behave. Comparison helpers return `None` when a comparison is not
/// defined for the given pair; the evaluator treats that as false.
///

/// Equality with numeric widening across int/float.
///
/// Returns `None` if the two values are not comparable (mixed
/// non-numeric kinds, or null against a non-null value).
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(true),
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::Text(a), Value::Text(b)) => Some(a == b),
        _ if left.is_numeric() && right.is_numeric() => {
            cmp_numeric(left, right).map(|ord| ord == Ordering::Equal)
        }
        _ => None,
    }
}

/// Strict ordering for comparable value pairs.
///
/// Numeric pairs order numerically with int/float widening; text pairs
/// order lexicographically; booleans order false < true. Any other
/// pairing is undefined.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ if left.is_numeric() && right.is_numeric() => cmp_numeric(left, right),
        _ => None,
    }
}

/// Numeric comparison with widening.
///
/// Same-kind integers compare exactly; any int/float mix widens to
/// `f64`. `None` only when a value is non-numeric or NaN is involved.
#[must_use]
pub fn cmp_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Some(a.cmp(b));
    }

    let a = left.as_f64()?;
    let b = right.as_f64()?;
    a.partial_cmp(&b)
}

//! Core runtime for the Zeno slice engine: the scalar value model, the
//! filter expression AST with its stored-text parser, and the evaluator
//! that selects the records belonging to a slice.
#![warn(unreachable_pub)]

pub mod error;
pub mod filter;
pub mod record;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, parsers, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{FilterExpr, Operation, Predicate, evaluate, filter},
        record::Record,
        value::Value,
    };
}

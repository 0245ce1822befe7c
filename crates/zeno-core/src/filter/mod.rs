pub mod ast;
pub mod diag;
pub mod eval;
pub mod like;
pub mod parse;
pub mod wire;

#[cfg(test)]
mod tests;

pub use ast::{FilterExpr, Operation, Predicate};
pub use diag::{CollectSink, DiagnosticSink, FilterDiagnostic, NullSink};
pub use eval::{FieldPresence, Row, evaluate, filter, filter_with};
pub use parse::parse;
pub use wire::{FilterPredicate, FilterPredicateGroup, GroupEntry, Join};

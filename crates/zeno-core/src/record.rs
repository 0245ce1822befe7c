use crate::{
    filter::eval::{FieldPresence, Row},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Record
///
/// One evaluation instance's column values, keyed by column name, plus
/// the stable data id used for tag membership. Immutable once loaded;
/// the evaluator never mutates it.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data_id: String,
    #[serde(default)]
    pub columns: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(data_id: impl Into<String>) -> Self {
        Self {
            data_id: data_id.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style column insertion, for loaders and tests.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }
}

impl Row for Record {
    fn field(&self, name: &str) -> FieldPresence {
        match self.columns.get(name) {
            Some(value) => FieldPresence::Present(value.clone()),
            None => FieldPresence::Missing,
        }
    }
}

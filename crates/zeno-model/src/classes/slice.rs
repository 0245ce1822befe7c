use crate::error::SliceLoadError;
use serde::{Deserialize, Serialize};
use zeno_core::filter::wire::FilterPredicateGroup;
use zeno_core::prelude::*;

///
/// Slice
///
/// A named, saved subset of a project's instances, defined by a filter.
/// The pseudo-slice returned by [`Slice::all_instances`] matches every
/// instance and carries the sentinel id [`ALL_INSTANCES_ID`].
///

/// Sentinel id for the implicit "all instances" slice.
pub const ALL_INSTANCES_ID: i64 = -1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub id: i64,
    pub slice_name: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
    pub filter_predicates: FilterPredicateGroup,
}

impl Slice {
    #[must_use]
    pub fn new(id: i64, slice_name: &str, filter_predicates: FilterPredicateGroup) -> Self {
        Self {
            id,
            slice_name: slice_name.to_string(),
            folder_id: None,
            filter_predicates,
        }
    }

    /// The pseudo-slice covering the whole project.
    #[must_use]
    pub fn all_instances() -> Self {
        Self {
            id: ALL_INSTANCES_ID,
            slice_name: "All instances".to_string(),
            folder_id: None,
            filter_predicates: FilterPredicateGroup::empty(),
        }
    }

    /// Builds a slice from its stored filter text. A payload whose first
    /// non-whitespace byte is `{` is decoded as a JSON predicate group;
    /// anything else is parsed as filter expression text.
    pub fn from_stored(
        id: i64,
        slice_name: &str,
        folder_id: Option<i64>,
        stored: &str,
    ) -> Result<Self, SliceLoadError> {
        let trimmed = stored.trim_start();
        let filter_predicates = if trimmed.starts_with('{') {
            serde_json::from_str(trimmed)?
        } else {
            let expr = zeno_core::filter::parse::parse(stored)?;
            FilterPredicateGroup::from(&expr)
        };

        Ok(Self {
            id,
            slice_name: slice_name.to_string(),
            folder_id,
            filter_predicates,
        })
    }

    /// The slice's filter as an evaluable expression.
    #[must_use]
    pub fn expression(&self) -> FilterExpr {
        self.filter_predicates.to_expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_json_group_is_decoded() {
        let stored = r#"{"predicates": [{"column": "label", "operation": "EQUAL", "value": "cat", "join": ""}], "join": ""}"#;
        let slice = Slice::from_stored(3, "cats", None, stored).unwrap();

        assert_eq!(slice.expression(), FilterExpr::eq("label", "cat"));
    }

    #[test]
    fn stored_expression_text_is_parsed() {
        let slice = Slice::from_stored(4, "short", Some(1), "length < 10 AND label == 'cat'")
            .unwrap();

        assert_eq!(
            slice.expression(),
            FilterExpr::lt("length", 10_i64) & FilterExpr::eq("label", "cat")
        );
    }

    #[test]
    fn all_instances_matches_everything() {
        assert_eq!(Slice::all_instances().id, ALL_INSTANCES_ID);
        assert_eq!(Slice::all_instances().expression(), FilterExpr::True);
    }

    #[test]
    fn malformed_stored_text_is_an_error() {
        assert!(Slice::from_stored(5, "bad", None, "label ===").is_err());
        assert!(Slice::from_stored(6, "bad", None, "{not json").is_err());
    }

    #[test]
    fn slice_round_trips_through_json() {
        let slice = Slice::from_stored(7, "cats", Some(2), "label == 'cat'").unwrap();
        let json = serde_json::to_string(&slice).unwrap();
        let back: Slice = serde_json::from_str(&json).unwrap();

        assert_eq!(slice, back);
    }
}

use crate::{
    filter::ast::{FilterExpr, Operation, Predicate},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// Wire form of slice filters
///
/// The `slices.filter` column stores a JSON predicate group: a list of
/// predicates and nested groups, each carrying the join that connects
/// it to the element before it. This module round-trips that shape and
/// converts it to and from the expression tree.
///

///
/// Join
///
/// The outermost group and the first element of any group are stored
/// with the empty-string "omitted" join.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Join {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[default]
    #[serde(rename = "")]
    Omitted,
}

///
/// FilterPredicate
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPredicate {
    pub column: String,
    pub operation: Operation,
    pub value: Value,
    #[serde(default)]
    pub join: Join,
}

///
/// GroupEntry
///
/// Groups nest: an entry is either a predicate or a sub-group.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupEntry {
    Group(FilterPredicateGroup),
    Predicate(FilterPredicate),
}

impl GroupEntry {
    const fn join(&self) -> Join {
        match self {
            Self::Group(group) => group.join,
            Self::Predicate(predicate) => predicate.join,
        }
    }
}

///
/// FilterPredicateGroup
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPredicateGroup {
    pub predicates: Vec<GroupEntry>,
    #[serde(default)]
    pub join: Join,
}

impl FilterPredicateGroup {
    /// The empty group: matches every record.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            predicates: Vec::new(),
            join: Join::Omitted,
        }
    }

    /// Fold the group into an expression tree.
    ///
    /// Entries combine left to right by each entry's own join; an
    /// omitted join on a non-leading entry is treated as AND. An empty
    /// group is the match-all expression.
    #[must_use]
    pub fn to_expr(&self) -> FilterExpr {
        let mut expr: Option<FilterExpr> = None;
        for entry in &self.predicates {
            let next = match entry {
                GroupEntry::Group(group) => group.to_expr(),
                GroupEntry::Predicate(predicate) => FilterExpr::Predicate(Predicate {
                    column: predicate.column.clone(),
                    operation: predicate.operation,
                    value: predicate.value.clone(),
                }),
            };

            expr = Some(match (expr, entry.join()) {
                (None, _) => next,
                (Some(acc), Join::Or) => acc | next,
                (Some(acc), Join::And | Join::Omitted) => acc & next,
            });
        }

        expr.unwrap_or(FilterExpr::True)
    }
}

impl From<&FilterExpr> for FilterPredicateGroup {
    fn from(expr: &FilterExpr) -> Self {
        fn entry(expr: &FilterExpr, join: Join) -> GroupEntry {
            match expr {
                FilterExpr::Predicate(predicate) => GroupEntry::Predicate(FilterPredicate {
                    column: predicate.column.clone(),
                    operation: predicate.operation,
                    value: predicate.value.clone(),
                    join,
                }),
                other => {
                    let mut group = FilterPredicateGroup::from(other);
                    group.join = join;
                    GroupEntry::Group(group)
                }
            }
        }

        fn entries(children: &[FilterExpr], join: Join) -> Vec<GroupEntry> {
            children
                .iter()
                .enumerate()
                .map(|(idx, child)| entry(child, if idx == 0 { Join::Omitted } else { join }))
                .collect()
        }

        match expr {
            FilterExpr::True => Self::empty(),
            FilterExpr::And(children) => Self {
                predicates: entries(children, Join::And),
                join: Join::Omitted,
            },
            FilterExpr::Or(children) => Self {
                predicates: entries(children, Join::Or),
                join: Join::Omitted,
            },
            FilterExpr::Predicate(_) => Self {
                predicates: vec![entry(expr, Join::Omitted)],
                join: Join::Omitted,
            },
        }
    }
}

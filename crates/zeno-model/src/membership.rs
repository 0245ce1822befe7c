use crate::classes::{Slice, Tag};
use std::collections::HashSet;
use zeno_core::filter::diag::DiagnosticSink;
use zeno_core::prelude::*;

///
/// Membership
///
/// Resolving which records belong to a slice or a tag, plus the
/// offset/limit pagination applied when serving instance tables.
///

/// Records matching the slice's filter, in their stored order.
#[must_use]
pub fn slice_members<'a>(slice: &Slice, records: &'a [Record]) -> Vec<&'a Record> {
    filter(&slice.expression(), records)
}

/// `slice_members` with an injected sink for filter diagnostics.
#[must_use]
pub fn slice_members_with<'a>(
    slice: &Slice,
    records: &'a [Record],
    sink: &dyn DiagnosticSink,
) -> Vec<&'a Record> {
    zeno_core::filter::eval::filter_with(&slice.expression(), records, sink)
}

/// Records the tag lists, in their stored order. Ids the tag carries
/// but the project does not contain are skipped.
#[must_use]
pub fn tag_members<'a>(tag: &Tag, records: &'a [Record]) -> Vec<&'a Record> {
    let wanted: HashSet<&str> = tag.data_ids.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|record| wanted.contains(record.data_id.as_str()))
        .collect()
}

/// One page of a member list. An offset past the end yields an empty
/// page; a limit of zero means no limit.
#[must_use]
pub fn paginate<'a>(members: &[&'a Record], offset: usize, limit: usize) -> Vec<&'a Record> {
    let page = members.iter().skip(offset).copied();
    if limit == 0 {
        page.collect()
    } else {
        page.take(limit).collect()
    }
}

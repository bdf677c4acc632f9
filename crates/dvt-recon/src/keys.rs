//! Unique key construction and key unification.

use std::collections::BTreeSet;

use crate::aggregate::AggregatedRows;

/// Separator between dimension values inside a key.
pub const KEY_SEPARATOR: &str = "-";

/// Build the unique key of a dimension tuple: values joined with `-`, upper-cased.
pub fn unique_key<S: AsRef<str>>(tuple: &[S]) -> String {
    tuple
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
        .to_uppercase()
}

/// Union of the keys of both aggregates, in lexicographic order.
pub fn unify_keys(left: &AggregatedRows, right: &AggregatedRows) -> BTreeSet<String> {
    left.keys().chain(right.keys()).map(str::to_string).collect()
}

//! Case-insensitive substring filter over record lists.

use crate::records::Record;

/// Check whether `query` (already lower-cased) occurs in any searchable field of `record`
fn matches_folded<R: Record>(record: &R, folded_query: &str) -> bool {
    record
        .searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(folded_query))
}

/// Check whether a single record matches the query. The empty query matches everything.
pub fn matches<R: Record>(record: &R, query: &str) -> bool {
    query.is_empty() || matches_folded(record, &query.to_lowercase())
}

/// Return the records whose searchable fields contain `query`, ignoring case.
///
/// The input order is kept. No trimming or tokenization is applied to the query.
pub fn filter_records<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let folded = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_folded(*record, &folded))
        .collect()
}

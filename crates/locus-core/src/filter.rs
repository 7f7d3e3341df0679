use crate::model::{Record, RecordId};

/// Filter records by a free-text search term.
///
/// Case-insensitive substring match against name or address. An empty or
/// whitespace-only term returns every record. Relative order is preserved.
pub fn filter<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.trim().is_empty() {
        return records.iter().collect();
    }
    let term_lower = term.to_lowercase();
    records.iter().filter(|r| r.matches(&term_lower)).collect()
}

/// Ids of the records `filter` would return, in the same order.
pub fn filtered_ids(records: &[Record], term: &str) -> Vec<RecordId> {
    filter(records, term).into_iter().map(|r| r.id.clone()).collect()
}

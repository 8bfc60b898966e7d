//! Pure derivations from the fetched user list to what the table shows.

use shared::domain::{StatusFilter, UserRecord};

/// Rows per page in the users table.
pub const PAGE_SIZE: usize = 5;

/// Narrows by status first, then by a case-insensitive substring of name or email.
/// Keeps the input order.
pub fn filter(records: &[UserRecord], status: StatusFilter, search_text: &str) -> Vec<UserRecord> {
    let needle = search_text.to_lowercase();
    records
        .iter()
        .filter(|record| status.matches(record.status))
        .filter(|record| {
            needle.is_empty()
                || record.name.to_lowercase().contains(&needle)
                || record.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// The 1-based `page` window of `records`. Pages past the end are empty.
pub fn paginate(records: &[UserRecord], page: usize, page_size: usize) -> &[UserRecord] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Position across the whole filtered list, starting at 1.
    pub serial: usize,
    pub record: UserRecord,
}

pub fn visible_rows(records: &[UserRecord], page: usize, page_size: usize) -> Vec<VisibleRow> {
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    paginate(records, page, page_size)
        .iter()
        .enumerate()
        .map(|(index, record)| VisibleRow {
            serial: offset + index + 1,
            record: record.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;

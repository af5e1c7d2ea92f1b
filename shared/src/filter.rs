use std::cmp::Reverse;

use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter applied to an already-fetched collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Free text matched case-insensitively against `Resource::search_fields`
    pub query: String,
    /// Foreign-key equality filter against `Resource::parent_id`
    pub parent_id: Option<i64>,
    /// `None` keeps the order the server returned
    pub sort: Option<SortDirection>,
}

impl ListFilter {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.parent_id.is_some()
    }
}

pub fn matches<R: Resource>(item: &R, filter: &ListFilter) -> bool {
    if let Some(parent_id) = filter.parent_id {
        if item.parent_id() != Some(parent_id) {
            return false;
        }
    }

    let needle = filter.query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Rescan the full list and return the matching records.
pub fn apply_filter<R: Resource>(items: &[R], filter: &ListFilter) -> Vec<R> {
    let mut visible: Vec<R> = items
        .iter()
        .filter(|item| matches(*item, filter))
        .cloned()
        .collect();

    if let Some(direction) = filter.sort {
        sort_items(&mut visible, direction);
    }
    visible
}

/// Stable, case-insensitive sort on `Resource::sort_key`
pub fn sort_items<R: Resource>(items: &mut [R], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => {
            items.sort_by_cached_key(|item| item.sort_key().to_lowercase());
        }
        SortDirection::Descending => {
            items.sort_by_cached_key(|item| Reverse(item.sort_key().to_lowercase()));
        }
    }
}

//! Paginated projection of the schedule collection.

use crate::store::{AppState, Command};
use crate::types::ScheduleRecord;

/// Number of pages needed for `total` rows, at least one
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Rows of a 1-based page; empty when the page is out of range
pub fn paginate(records: &[ScheduleRecord], page: usize, page_size: usize) -> &[ScheduleRecord] {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    page: usize,
    page_size: usize,
    mounted: bool,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            mounted: false,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Load the collection the first time the view is shown
    pub fn on_mount(&mut self) -> Option<Command> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(Command::FetchAll)
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total));
    }

    pub fn next_page(&mut self, total: usize) {
        self.set_page(self.page + 1, total);
    }

    pub fn prev_page(&mut self, total: usize) {
        self.set_page(self.page.saturating_sub(1), total);
    }

    /// Pull the page back in range after the collection shrank
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    pub fn visible<'a>(&self, state: &'a AppState) -> &'a [ScheduleRecord] {
        paginate(&state.schedules, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<ScheduleRecord> {
        (0..n)
            .map(|i| ScheduleRecord {
                id: Some(i.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_paginate_bounds() {
        let all = records(25);
        assert_eq!(paginate(&all, 1, 10).len(), 10);
        assert_eq!(paginate(&all, 3, 10).len(), 5);
        assert_eq!(paginate(&all, 3, 10)[0].id.as_deref(), Some("20"));
        assert!(paginate(&all, 4, 10).is_empty());
        assert!(paginate(&all, 0, 10).is_empty());
        assert!(paginate(&[], 1, 10).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_mount_fires_once() {
        let mut view = ListView::new(10);
        assert_eq!(view.on_mount(), Some(Command::FetchAll));
        assert_eq!(view.on_mount(), None);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut view = ListView::new(10);
        view.prev_page(25);
        assert_eq!(view.page(), 1);
        view.next_page(25);
        view.next_page(25);
        view.next_page(25);
        assert_eq!(view.page(), 3);

        // collection shrank to one page
        view.clamp(4);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_visible_reads_state() {
        let state = AppState {
            schedules: records(12),
            ..Default::default()
        };
        let mut view = ListView::new(5);
        view.set_page(3, state.schedules.len());
        let ids: Vec<_> = view
            .visible(&state)
            .iter()
            .filter_map(|r| r.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["10", "11"]);
    }
}

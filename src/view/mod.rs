//! Query-Result View Layer
//!
//! Owns the last fetched result set together with the pagination counters
//! and the active view mode. The result set is replaced wholesale on each
//! new query and never mutated in place; pagination and the waste-type
//! summary are both derived views over it.

pub mod summary;

pub use summary::{SummaryRow, SummaryTable};

use crate::types::Record;

/// Which of the two mutually exclusive views is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Detail,
    Summary,
}

/// Explicit view state over one query's result set
#[derive(Debug, Clone)]
pub struct QueryView {
    records: Vec<Record>,
    current_page: usize,
    page_size: usize,
    mode: ViewMode,
}

impl QueryView {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            // Page numbers are 1-based even for an empty set
            current_page: 1,
            page_size: page_size.max(1),
            mode: ViewMode::Detail,
        }
    }

    /// Replace the result set. Resets the current page to 1; the view mode
    /// is left alone.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.current_page = 1;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Number of pages: ceil(len / page_size), 0 for an empty set
    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(self.page_size)
    }

    /// Records of the current page: index range
    /// `[(page-1)*size, min(page*size, len))`. Empty slice for an empty set.
    pub fn page(&self) -> &[Record] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.records.len());
        if start >= end {
            &[]
        } else {
            &self.records[start..end]
        }
    }

    /// Jump to page `n`. Out-of-range requests are rejected and the current
    /// page stays put; returns whether the page changed.
    pub fn goto_page(&mut self, n: usize) -> bool {
        if n >= 1 && n <= self.page_count() && n != self.current_page {
            self.current_page = n;
            true
        } else {
            false
        }
    }

    /// Move forward one page, clamped at the last page
    pub fn next_page(&mut self) -> bool {
        self.goto_page(self.current_page + 1)
    }

    /// Move back one page, clamped at page 1
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.goto_page(self.current_page - 1)
        } else {
            false
        }
    }

    /// Switch the active view. Touches neither the result set nor the
    /// current page, so Detail → Summary → Detail lands where it left off.
    pub fn switch_to(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Pagination controls are a detail-view concern and only appear when
    /// there is more than one page.
    pub fn pagination_visible(&self) -> bool {
        self.mode == ViewMode::Detail && self.page_count() > 1
    }

    /// Waste-type summary over the full result set, independent of
    /// pagination. Recomputed on every call, never cached.
    pub fn summary(&self) -> SummaryTable {
        summary::summarize(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(seq_no: u64) -> Record {
        Record {
            seq_no,
            plant_name: "南區廠".to_string(),
            datetime: Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap(),
            lane: 1,
            vehicle_no: "KEA-1207".to_string(),
            source: "南區隊".to_string(),
            waste_type: "一般垃圾".to_string(),
            gross_weight: 12480.0,
            tare_weight: 8360.0,
            net_weight: 4120.0,
            amount: 3120.0,
            remark: None,
        }
    }

    fn view_with(count: u64, page_size: usize) -> QueryView {
        let mut view = QueryView::new(page_size);
        view.set_records((1..=count).map(record).collect());
        view
    }

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(view_with(125, 50).page_count(), 3);
        assert_eq!(view_with(100, 50).page_count(), 2);
        assert_eq!(view_with(1, 50).page_count(), 1);
        assert_eq!(view_with(0, 50).page_count(), 0);
    }

    #[test]
    fn page_slices_are_bounded() {
        let mut view = view_with(125, 50);
        assert_eq!(view.page().len(), 50);
        assert!(view.goto_page(3));
        assert_eq!(view.page().len(), 25);
        assert_eq!(view.page()[0].seq_no, 101);
    }

    #[test]
    fn out_of_range_page_request_is_rejected() {
        let mut view = view_with(125, 50);
        assert!(view.goto_page(3));
        assert!(!view.goto_page(4));
        assert_eq!(view.current_page(), 3);
        assert!(!view.goto_page(0));
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn prev_clamps_at_first_page() {
        let mut view = view_with(10, 50);
        assert!(!view.prev_page());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn next_clamps_at_last_page() {
        let mut view = view_with(60, 50);
        assert!(view.next_page());
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn new_result_set_resets_page() {
        let mut view = view_with(125, 50);
        view.goto_page(3);
        view.set_records((1..=10).map(record).collect());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn empty_set_has_empty_page() {
        let view = QueryView::new(50);
        assert!(view.page().is_empty());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn pages_concatenate_to_result_set() {
        let mut view = view_with(125, 50);
        let mut seen: Vec<u64> = Vec::new();
        loop {
            seen.extend(view.page().iter().map(|r| r.seq_no));
            if !view.next_page() {
                break;
            }
        }
        let expected: Vec<u64> = (1..=125).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn view_switch_keeps_records_and_page() {
        let mut view = view_with(125, 50);
        view.goto_page(2);
        view.switch_to(ViewMode::Summary);
        let _ = view.summary();
        view.switch_to(ViewMode::Detail);
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.len(), 125);
    }

    #[test]
    fn pagination_hidden_in_summary_and_single_page() {
        let mut view = view_with(125, 50);
        assert!(view.pagination_visible());
        view.switch_to(ViewMode::Summary);
        assert!(!view.pagination_visible());

        let single = view_with(10, 50);
        assert!(!single.pagination_visible());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let view = QueryView::new(0);
        assert_eq!(view.page_size(), 1);
    }
}

//! DataGrid: a tabular view over an in-memory record collection.
//!
//! The grid owns all interaction state (search query, sort, page, page size,
//! selection, cursor) and exposes it through plain transition methods. Every
//! method that changes the selection returns a [`GridEvent`] carrying the full
//! list of selected records, so callers react without holding callbacks into
//! the grid. Rendering lives in `ui::grid`; nothing here knows about the
//! terminal.

pub mod column;
pub mod value;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Range;

pub use column::{CellAction, ColumnSpec};
pub use value::{compare_values, CellValue, Record};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [10, 20, 50];
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Construction-time configuration of a grid
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Field holding each record's identity; falls back to input position
    pub identity_field: String,
    pub selectable: bool,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub initial_sort: Option<SortSpec>,
    /// Fields matched by search; `None` or empty means every column key
    pub search_fields: Option<Vec<String>>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
            selectable: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            initial_sort: None,
            search_fields: None,
        }
    }
}

/// Notifications produced by grid transitions
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Full list of selected records, in input order
    SelectionChanged(Vec<Record>),
    RowActivated(Record),
    CellAction { action: CellAction, record: Record },
}

/// A record paired with its identity and input position
#[derive(Debug, Clone)]
pub struct GridRow {
    key: String,
    index: usize,
    record: Record,
}

impl GridRow {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

#[derive(Debug)]
pub struct DataGrid {
    columns: Vec<ColumnSpec>,
    rows: Vec<GridRow>,
    options: GridOptions,
    query: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    selected: BTreeSet<String>,
    /// Filtered + sorted row indices, rebuilt only when records, query or sort change
    ordered: Vec<usize>,
    cursor: usize,
    focused_column: usize,
}

impl DataGrid {
    pub fn new(columns: Vec<ColumnSpec>, records: Vec<Record>, options: GridOptions) -> Self {
        let mut grid = Self {
            columns,
            rows: Vec::new(),
            query: String::new(),
            sort: options.initial_sort.clone(),
            page: 1,
            page_size: options.page_size.max(1),
            selected: BTreeSet::new(),
            ordered: Vec::new(),
            cursor: 0,
            focused_column: 0,
            options,
        };
        grid.rows = key_records(records, &grid.options.identity_field);
        grid.refresh();
        grid
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn is_selectable(&self) -> bool {
        self.options.selectable
    }

    /// Number of records before filtering
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the backing collection, pruning selections that no longer exist.
    pub fn set_records(&mut self, records: Vec<Record>) -> GridEvent {
        self.rows = key_records(records, &self.options.identity_field);
        let present: BTreeSet<&str> = self.rows.iter().map(|row| row.key.as_str()).collect();
        self.selected.retain(|key| present.contains(key.as_str()));
        self.refresh();
        self.selection_event()
    }

    // === Search ===

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
        self.cursor = 0;
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    fn search_fields(&self) -> Vec<&str> {
        match self.options.search_fields.as_ref() {
            Some(fields) if !fields.is_empty() => fields.iter().map(String::as_str).collect(),
            _ => self
                .columns
                .iter()
                .map(|column| column.key.as_str())
                .filter(|key| !key.is_empty())
                .collect(),
        }
    }

    // === Sort ===

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn sort_direction(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    /// Header activation: unsorted -> ascending -> descending -> unsorted.
    ///
    /// Returns false (and changes nothing) for unknown or non-sortable columns.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key == key && column.sortable);
        if !sortable {
            return false;
        }
        self.sort = match self.sort.as_ref() {
            Some(sort) if sort.key == key => match sort.direction {
                SortDirection::Ascending => Some(SortSpec::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        };
        self.page = 1;
        self.cursor = 0;
        self.refresh();
        true
    }

    pub fn toggle_sort_focused(&mut self) -> bool {
        match self.columns.get(self.focused_column) {
            Some(column) => {
                let key = column.key.clone();
                self.toggle_sort(&key)
            }
            None => false,
        }
    }

    // === Pagination ===

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.options.page_size_options
    }

    /// Records remaining after filtering
    pub fn total_items(&self) -> usize {
        self.ordered.len()
    }

    pub fn total_pages(&self) -> usize {
        self.ordered.len().div_ceil(self.page_size).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        self.cursor = 0;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        self.cursor = 0;
        true
    }

    /// Jump to `page`, clamped into range. Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages());
        if target == self.page {
            return false;
        }
        self.page = target;
        self.cursor = 0;
        true
    }

    /// Only sizes from the configured option list are accepted.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        let allowed = if self.options.page_size_options.is_empty() {
            size > 0
        } else {
            self.options.page_size_options.contains(&size)
        };
        if !allowed {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        self.cursor = 0;
        self.clamp_page();
        true
    }

    pub fn cycle_page_size(&mut self) -> usize {
        let options = &self.options.page_size_options;
        if let Some(&first) = options.first() {
            let next = options
                .iter()
                .position(|size| *size == self.page_size)
                .map(|idx| options[(idx + 1) % options.len()])
                .unwrap_or(first);
            self.set_page_size(next);
        }
        self.page_size
    }

    fn page_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.ordered.len());
        let end = (start + self.page_size).min(self.ordered.len());
        start..end
    }

    /// Rows visible on the current page, in display order
    pub fn page_rows(&self) -> Vec<&GridRow> {
        self.ordered[self.page_range()]
            .iter()
            .map(|idx| &self.rows[*idx])
            .collect()
    }

    /// Every filtered row in display order, across all pages
    pub fn visible_rows(&self) -> Vec<&GridRow> {
        self.ordered.iter().map(|idx| &self.rows[*idx]).collect()
    }

    pub fn row_at(&self, page_offset: usize) -> Option<&GridRow> {
        let range = self.page_range();
        self.ordered[range]
            .get(page_offset)
            .map(|idx| &self.rows[*idx])
    }

    // === Selection ===

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected records materialized from identities, in input order
    pub fn selected_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .filter(|row| self.selected.contains(&row.key))
            .map(|row| row.record.clone())
            .collect()
    }

    pub fn toggle_row(&mut self, key: &str) -> Option<GridEvent> {
        if !self.options.selectable || !self.rows.iter().any(|row| row.key == key) {
            return None;
        }
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
        Some(self.selection_event())
    }

    pub fn is_all_page_selected(&self) -> bool {
        let rows = self.page_rows();
        !rows.is_empty() && rows.iter().all(|row| self.selected.contains(&row.key))
    }

    /// Select every row on the page, or deselect them when all already are.
    pub fn toggle_all_on_page(&mut self) -> Option<GridEvent> {
        if !self.options.selectable {
            return None;
        }
        let all_selected = self.is_all_page_selected();
        let keys: Vec<String> = self
            .page_rows()
            .into_iter()
            .map(|row| row.key.clone())
            .collect();
        for key in keys {
            if all_selected {
                self.selected.remove(&key);
            } else {
                self.selected.insert(key);
            }
        }
        Some(self.selection_event())
    }

    pub fn clear_selection(&mut self) -> GridEvent {
        self.selected.clear();
        GridEvent::SelectionChanged(Vec::new())
    }

    fn selection_event(&self) -> GridEvent {
        GridEvent::SelectionChanged(self.selected_records())
    }

    // === Row interaction ===

    pub fn activate_row(&self, key: &str) -> Option<GridEvent> {
        self.find_row(key)
            .map(|row| GridEvent::RowActivated(row.record.clone()))
    }

    /// Interaction with one cell. Cells of a suppressing column yield their
    /// own action (if any) and never a row activation.
    pub fn interact_cell(&self, key: &str, column: usize) -> Option<GridEvent> {
        let row = self.find_row(key)?;
        let column = self.columns.get(column)?;
        if column.suppresses_row_interaction() {
            return column.cell_action().map(|action| GridEvent::CellAction {
                action: action.clone(),
                record: row.record.clone(),
            });
        }
        Some(GridEvent::RowActivated(row.record.clone()))
    }

    fn find_row(&self, key: &str) -> Option<&GridRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    // === Cursor ===

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_row(&self) -> Option<&GridRow> {
        self.row_at(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.page_range().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn set_cursor(&mut self, offset: usize) {
        let len = self.page_range().len();
        self.cursor = offset.min(len.saturating_sub(1));
    }

    pub fn toggle_cursor_row(&mut self) -> Option<GridEvent> {
        let key = self.cursor_row()?.key.clone();
        self.toggle_row(&key)
    }

    pub fn activate_cursor_row(&self) -> Option<GridEvent> {
        self.cursor_row()
            .map(|row| GridEvent::RowActivated(row.record.clone()))
    }

    /// Row-scoped action for the cursor row: the focused column's action, or
    /// the first column that carries one.
    pub fn cursor_cell_action(&self) -> Option<GridEvent> {
        let row = self.cursor_row()?;
        let action = self
            .columns
            .get(self.focused_column)
            .and_then(ColumnSpec::cell_action)
            .or_else(|| self.columns.iter().find_map(ColumnSpec::cell_action))?;
        Some(GridEvent::CellAction {
            action: action.clone(),
            record: row.record.clone(),
        })
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    pub fn focus_column(&mut self, forward: bool) {
        let len = self.columns.len();
        if len == 0 {
            return;
        }
        self.focused_column = if forward {
            (self.focused_column + 1) % len
        } else {
            (self.focused_column + len - 1) % len
        };
    }

    pub fn set_focused_column(&mut self, column: usize) {
        if column < self.columns.len() {
            self.focused_column = column;
        }
    }

    /// Footer summary line
    pub fn summary(&self) -> String {
        if self.selected.is_empty() {
            format!(
                "Showing {} of {} items",
                self.page_range().len(),
                self.total_items()
            )
        } else {
            format!("{} selected", self.selected.len())
        }
    }

    // === Derived view ===

    fn refresh(&mut self) {
        let needle = self.query.trim().to_lowercase();
        let fields = self.search_fields();
        let mut ordered: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || matches_query(&row.record, &fields, &needle))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(sort) = self.sort.as_ref() {
            let column = self.columns.iter().find(|column| column.key == sort.key);
            ordered.sort_by(|a, b| {
                compare_records(column, sort, &self.rows[*a].record, &self.rows[*b].record)
            });
        }

        self.ordered = ordered;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
        let len = self.page_range().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

fn key_records(records: Vec<Record>, identity_field: &str) -> Vec<GridRow> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let key = record
                .get(identity_field)
                .filter(|value| !value.is_null())
                .map(|value| value.to_string())
                .unwrap_or_else(|| index.to_string());
            GridRow { key, index, record }
        })
        .collect()
}

/// Whether any of `fields` contains `needle` (already trimmed and lowercased).
pub fn matches_query(record: &Record, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .get(field)
            .filter(|value| !value.is_null())
            .map(|value| value.to_string().to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Comparator chain: custom comparator, nulls first, then value comparison.
/// The result is oriented by the sort direction at every step.
pub fn compare_records(
    column: Option<&ColumnSpec>,
    sort: &SortSpec,
    a: &Record,
    b: &Record,
) -> Ordering {
    if let Some(comparator) = column.and_then(ColumnSpec::comparator) {
        return sort.direction.apply(comparator(a, b));
    }
    let va = a.get(&sort.key).filter(|value| !value.is_null());
    let vb = b.get(&sort.key).filter(|value| !value.is_null());
    let ordering = match (va, vb) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => compare_values(x, y),
    };
    sort.direction.apply(ordering)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("invoice", "Invoice No.").action(CellAction::Inspect),
            ColumnSpec::new("order", "Order Number").sortable(),
            ColumnSpec::new("postcode", "Postcode").sortable(),
            ColumnSpec::new("driver", "Driver Name").sortable(),
            ColumnSpec::new("status", "Status"),
        ]
    }

    fn assignment(id: i64, driver: &str, postcode: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("invoice", format!("12617{id:02}"))
            .with("order", format!("201160{id:02}"))
            .with("postcode", postcode)
            .with("driver", driver)
            .with("status", "Complete")
    }

    fn records(n: i64) -> Vec<Record> {
        (0..n)
            .map(|id| assignment(id, &format!("Driver{id}"), &format!("{}", 2100 + id)))
            .collect()
    }

    fn grid(n: i64) -> DataGrid {
        DataGrid::new(columns(), records(n), GridOptions::default())
    }

    fn selected_ids(event: &GridEvent) -> Vec<String> {
        match event {
            GridEvent::SelectionChanged(records) => {
                records.iter().map(|record| record.text("id")).collect()
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_identity_falls_back_to_position() {
        let records = vec![
            Record::new().with("driver", "Adam"),
            Record::new().with("driver", "Mark").with("id", "m-1"),
            Record::new().with("driver", "Ana").with("id", CellValue::Null),
        ];
        let grid = DataGrid::new(columns(), records, GridOptions::default());
        let keys: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(keys, vec!["0", "m-1", "2"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let mut grid = grid(12);
        grid.set_query("  driver1 ");
        // Driver1, Driver10, Driver11
        assert_eq!(grid.total_items(), 3);

        grid.set_query("   ");
        assert_eq!(grid.total_items(), 12);
    }

    #[test]
    fn test_search_respects_field_override() {
        let options = GridOptions {
            search_fields: Some(vec!["postcode".to_string()]),
            ..GridOptions::default()
        };
        let mut grid = DataGrid::new(columns(), records(12), options);
        grid.set_query("driver");
        assert_eq!(grid.total_items(), 0);
        grid.set_query("2105");
        assert_eq!(grid.total_items(), 1);
    }

    #[test]
    fn test_search_skips_null_fields() {
        let records = vec![
            Record::new().with("driver", CellValue::Null),
            Record::new().with("driver", "null"),
        ];
        let mut grid = DataGrid::new(columns(), records, GridOptions::default());
        grid.set_query("null");
        assert_eq!(grid.total_items(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut grid = grid(30);
        grid.set_query("driver2");
        let first: Vec<Record> = grid
            .visible_rows()
            .iter()
            .map(|row| row.record().clone())
            .collect();

        let mut again = DataGrid::new(columns(), first.clone(), GridOptions::default());
        again.set_query("driver2");
        let second: Vec<Record> = again
            .visible_rows()
            .iter()
            .map(|row| row.record().clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_cycle_returns_to_unsorted() {
        let mut grid = grid(5);
        assert!(grid.toggle_sort("postcode"));
        assert_eq!(grid.sort_direction("postcode"), Some(SortDirection::Ascending));
        assert!(grid.toggle_sort("postcode"));
        assert_eq!(grid.sort_direction("postcode"), Some(SortDirection::Descending));
        assert!(grid.toggle_sort("postcode"));
        assert_eq!(grid.sort(), None);
    }

    #[test]
    fn test_sort_new_column_starts_ascending() {
        let mut grid = grid(5);
        grid.toggle_sort("postcode");
        grid.toggle_sort("postcode");
        grid.toggle_sort("driver");
        assert_eq!(grid.sort(), Some(&SortSpec::ascending("driver")));
        assert_eq!(grid.sort_direction("postcode"), None);
    }

    #[test]
    fn test_non_sortable_header_is_noop() {
        let mut grid = grid(5);
        assert!(!grid.toggle_sort("status"));
        assert!(!grid.toggle_sort("unknown"));
        assert_eq!(grid.sort(), None);
    }

    #[test]
    fn test_sort_resets_page() {
        let mut grid = grid(25);
        grid.next_page();
        assert_eq!(grid.page(), 2);
        grid.toggle_sort("driver");
        assert_eq!(grid.page(), 1);
    }

    #[test]
    fn test_sort_descending_and_stable_on_resort() {
        let mut grid = grid(6);
        grid.toggle_sort("postcode");
        grid.toggle_sort("postcode");
        let desc: Vec<String> = grid
            .page_rows()
            .iter()
            .map(|row| row.record().text("postcode"))
            .collect();
        assert_eq!(desc, vec!["2105", "2104", "2103", "2102", "2101", "2100"]);

        let mut grid = grid_with_duplicates();
        grid.toggle_sort("postcode");
        let first: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        let first: Vec<String> = first.into_iter().map(str::to_string).collect();
        grid.toggle_sort("postcode");
        grid.toggle_sort("postcode");
        grid.toggle_sort("postcode");
        let second: Vec<String> = grid
            .page_rows()
            .iter()
            .map(|row| row.key().to_string())
            .collect();
        assert_eq!(first, second);
        // equal postcodes keep input order
        assert_eq!(first, vec!["1", "3", "0", "2"]);
    }

    fn grid_with_duplicates() -> DataGrid {
        let records = vec![
            assignment(0, "Adam", "2170"),
            assignment(1, "Mark", "2167"),
            assignment(2, "Adam", "2170"),
            assignment(3, "Mark", "2167"),
        ];
        DataGrid::new(columns(), records, GridOptions::default())
    }

    #[test]
    fn test_nulls_sort_first_ascending_last_descending() {
        let records = vec![
            Record::new().with("id", 1).with("postcode", "2170"),
            Record::new().with("id", 2),
            Record::new().with("id", 3).with("postcode", "2000"),
        ];
        let mut grid = DataGrid::new(columns(), records, GridOptions::default());
        grid.toggle_sort("postcode");
        let asc: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(asc, vec!["2", "3", "1"]);
        grid.toggle_sort("postcode");
        let desc: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(desc, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_numeric_sort_beats_string_order() {
        let records = vec![
            Record::new().with("id", 1).with("order", 10),
            Record::new().with("id", 2).with("order", 9),
            Record::new().with("id", 3).with("order", 100),
        ];
        let mut grid = DataGrid::new(columns(), records, GridOptions::default());
        grid.toggle_sort("order");
        let keys: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(keys, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_custom_comparator_wins_and_follows_direction() {
        let columns = vec![ColumnSpec::new("driver", "Driver")
            .sortable()
            .compare_by(|a, b| a.text("driver").len().cmp(&b.text("driver").len()))];
        let records = vec![
            Record::new().with("id", 1).with("driver", "Alexandra"),
            Record::new().with("id", 2).with("driver", "Bo"),
            Record::new().with("id", 3).with("driver", "Mark"),
        ];
        let mut grid = DataGrid::new(columns, records, GridOptions::default());
        grid.toggle_sort("driver");
        let asc: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(asc, vec!["2", "3", "1"]);
        grid.toggle_sort("driver");
        let desc: Vec<&str> = grid.page_rows().iter().map(|row| row.key()).collect();
        assert_eq!(desc, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_initial_sort_applies() {
        let options = GridOptions {
            initial_sort: Some(SortSpec::descending("postcode")),
            ..GridOptions::default()
        };
        let grid = DataGrid::new(columns(), records(3), options);
        assert_eq!(grid.page_rows()[0].record().text("postcode"), "2102");
    }

    #[test]
    fn test_total_pages_formula() {
        for (n, size, expected) in [(0, 10, 1), (1, 10, 1), (10, 10, 1), (11, 10, 2), (45, 20, 3)] {
            let mut grid = grid(n);
            grid.set_page_size(size);
            assert_eq!(grid.total_pages(), expected, "n={n} size={size}");
        }
    }

    #[test]
    fn test_page_boundaries_are_noops() {
        let mut grid = grid(15);
        assert!(!grid.has_prev());
        assert!(!grid.prev_page());
        assert!(grid.next_page());
        assert!(!grid.has_next());
        assert!(!grid.next_page());
        assert_eq!(grid.page(), 2);
        assert_eq!(grid.page_rows().len(), 5);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut grid = grid(25);
        grid.set_page(99);
        assert_eq!(grid.page(), 3);
        grid.set_page(0);
        assert_eq!(grid.page(), 1);
    }

    #[test]
    fn test_page_clamps_when_collection_shrinks() {
        let mut grid = grid(25);
        grid.set_page(3);
        grid.set_records(records(12));
        assert_eq!(grid.page(), 2);
        grid.set_records(Vec::new());
        assert_eq!(grid.page(), 1);
        assert_eq!(grid.total_pages(), 1);
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let mut grid = grid(25);
        grid.next_page();
        assert!(!grid.set_page_size(15));
        assert_eq!(grid.page(), 2);
        assert!(grid.set_page_size(20));
        assert_eq!(grid.page(), 1);
        assert_eq!(grid.total_pages(), 2);
    }

    #[test]
    fn test_cycle_page_size_wraps() {
        let mut grid = grid(5);
        assert_eq!(grid.cycle_page_size(), 20);
        assert_eq!(grid.cycle_page_size(), 50);
        assert_eq!(grid.cycle_page_size(), 10);
    }

    #[test]
    fn test_search_resets_page() {
        let mut grid = grid(25);
        grid.set_page(3);
        grid.set_query("driver");
        assert_eq!(grid.page(), 1);
    }

    #[test]
    fn test_toggle_row_notifies_with_records() {
        let mut grid = grid(5);
        let event = grid.toggle_row("3").expect("selectable");
        assert_eq!(selected_ids(&event), vec!["3"]);
        let event = grid.toggle_row("1").expect("selectable");
        assert_eq!(selected_ids(&event), vec!["1", "3"]);
        let event = grid.toggle_row("3").expect("selectable");
        assert_eq!(selected_ids(&event), vec!["1"]);
        assert!(grid.toggle_row("nope").is_none());
    }

    #[test]
    fn test_toggle_all_on_page_completes_partial_selection() {
        let mut grid = grid(12);
        for id in 0..8 {
            grid.toggle_row(&id.to_string());
        }
        let event = grid.toggle_all_on_page().expect("selectable");
        assert_eq!(selected_ids(&event).len(), 10);
        assert!(grid.is_all_page_selected());

        let event = grid.toggle_all_on_page().expect("selectable");
        assert!(selected_ids(&event).is_empty());
    }

    #[test]
    fn test_selection_survives_pagination() {
        let mut grid = grid(25);
        grid.toggle_all_on_page();
        grid.next_page();
        assert!(!grid.is_all_page_selected());
        grid.prev_page();
        assert!(grid.is_all_page_selected());
        assert_eq!(grid.selected_count(), 10);
    }

    #[test]
    fn test_selection_survives_search() {
        let mut grid = grid(12);
        grid.toggle_row("4");
        grid.set_query("driver1");
        assert!(grid.is_selected("4"));
        grid.clear_query();
        assert_eq!(grid.selected_records().len(), 1);
    }

    #[test]
    fn test_clear_selection_notifies_empty() {
        let mut grid = grid(5);
        grid.toggle_all_on_page();
        assert_eq!(grid.clear_selection(), GridEvent::SelectionChanged(Vec::new()));
        assert_eq!(grid.selected_count(), 0);
    }

    #[test]
    fn test_set_records_prunes_stale_selection() {
        let mut grid = grid(5);
        grid.toggle_row("1");
        grid.toggle_row("4");
        let event = grid.set_records(records(3));
        assert_eq!(selected_ids(&event), vec!["1"]);
        assert!(!grid.is_selected("4"));
    }

    #[test]
    fn test_not_selectable_ignores_selection() {
        let options = GridOptions {
            selectable: false,
            ..GridOptions::default()
        };
        let mut grid = DataGrid::new(columns(), records(5), options);
        assert!(grid.toggle_row("1").is_none());
        assert!(grid.toggle_all_on_page().is_none());
        assert_eq!(grid.selected_count(), 0);
    }

    #[test]
    fn test_suppressing_cell_yields_action_not_activation() {
        let grid = grid(3);
        match grid.interact_cell("1", 0) {
            Some(GridEvent::CellAction { action, record }) => {
                assert_eq!(action, CellAction::Inspect);
                assert_eq!(record.text("id"), "1");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            grid.interact_cell("1", 2),
            Some(GridEvent::RowActivated(_))
        ));
    }

    #[test]
    fn test_suppressing_cell_without_action_does_nothing() {
        let columns = vec![ColumnSpec::new("note", "Note").suppress_row_interaction()];
        let grid = DataGrid::new(columns, records(2), GridOptions::default());
        assert!(grid.interact_cell("0", 0).is_none());
    }

    #[test]
    fn test_cursor_action_falls_back_to_first_action_column() {
        let mut grid = grid(3);
        grid.set_focused_column(3);
        grid.move_cursor(1);
        match grid.cursor_cell_action() {
            Some(GridEvent::CellAction { record, .. }) => assert_eq!(record.text("id"), "1"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cursor_clamps_to_page() {
        let mut grid = grid(12);
        grid.move_cursor(50);
        assert_eq!(grid.cursor(), 9);
        grid.next_page();
        assert_eq!(grid.cursor(), 0);
        grid.move_cursor(50);
        assert_eq!(grid.cursor(), 1);
        grid.move_cursor(-5);
        assert_eq!(grid.cursor(), 0);
    }

    #[test]
    fn test_summary_text() {
        let mut grid = grid(12);
        assert_eq!(grid.summary(), "Showing 10 of 12 items");
        grid.toggle_row("2");
        assert_eq!(grid.summary(), "1 selected");
    }
}

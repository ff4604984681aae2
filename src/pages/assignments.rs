//! Completed and ongoing assignment lists, both backed by a DataGrid.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Action, Command, Context, Module, NavigateTarget, NotifyLevel};
use crate::grid::{CellAction, ColumnSpec, DataGrid, GridEvent, GridOptions, Record};

/// Field holding the proof-of-delivery link
pub const POD_FIELD: &str = "podUrl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Completed,
    Ongoing,
}

impl AssignmentKind {
    pub fn title(&self) -> &'static str {
        match self {
            AssignmentKind::Completed => "Completed Assignments",
            AssignmentKind::Ongoing => "Ongoing Assignments",
        }
    }

    pub fn columns(&self) -> Vec<ColumnSpec> {
        match self {
            AssignmentKind::Completed => completed_columns(),
            AssignmentKind::Ongoing => ongoing_columns(),
        }
    }
}

fn data_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("order", "Order Number").sortable().width(14),
        ColumnSpec::new("postcode", "Postcode").sortable().width(10),
        ColumnSpec::new("status", "Status").width(12),
        ColumnSpec::new("description", "Description").width(14),
        ColumnSpec::new("driver", "Driver Name").sortable().width(14),
    ]
}

pub fn completed_columns() -> Vec<ColumnSpec> {
    let mut columns = vec![ColumnSpec::new("invoice", "Invoice No.")
        .width(12)
        .render(|record| format!("{} ↗", record.text("invoice")))
        .action(CellAction::Inspect)];
    columns.extend(data_columns());
    columns.push(
        ColumnSpec::new("pod", "Proof of Delivery")
            .width(18)
            .render(|record| {
                if record.text(POD_FIELD).is_empty() {
                    String::new()
                } else {
                    "⤓".to_string()
                }
            })
            .action(CellAction::OpenLink {
                field: POD_FIELD.to_string(),
            }),
    );
    columns
}

pub fn ongoing_columns() -> Vec<ColumnSpec> {
    let mut columns = vec![ColumnSpec::new("invoice", "Invoice No.").width(12)];
    columns.extend(data_columns());
    columns.push(
        ColumnSpec::new("pod", "Proof of Delivery")
            .width(18)
            .render(|_| "[Download]".to_string())
            .action(CellAction::OpenLink {
                field: POD_FIELD.to_string(),
            }),
    );
    columns
}

#[derive(Debug)]
pub struct AssignmentsPage {
    kind: AssignmentKind,
    grid: DataGrid,
}

impl AssignmentsPage {
    pub fn new(kind: AssignmentKind, records: Vec<Record>, options: GridOptions) -> Self {
        Self {
            kind,
            grid: DataGrid::new(kind.columns(), records, options),
        }
    }

    pub fn kind(&self) -> AssignmentKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Total assignments in the backing list, regardless of search
    pub fn total(&self) -> usize {
        self.grid.record_count()
    }

    pub fn grid(&self) -> &DataGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    /// Turn a grid notification into an app action. Selection changes are
    /// recorded in the shared context.
    pub fn apply_event(&self, event: Option<GridEvent>, ctx: &mut Context) -> Action {
        match event {
            None => Action::None,
            Some(GridEvent::SelectionChanged(records)) => {
                tracing::debug!(page = self.title(), selected = records.len(), "selection changed");
                ctx.selection = records;
                Action::None
            }
            Some(GridEvent::RowActivated(record)) => Action::Inspect(record),
            Some(GridEvent::CellAction { action, record }) => match action {
                CellAction::Inspect => Action::Inspect(record),
                CellAction::OpenLink { field } => {
                    let link = record.text(&field);
                    if link.is_empty() {
                        Action::Notify("No proof of delivery on file".to_string(), NotifyLevel::Warn)
                    } else {
                        Action::OpenLink(link)
                    }
                }
            },
        }
    }

    /// Records acted on by copy: the reported selection, or the cursor row.
    fn target_records(&self, ctx: &Context) -> Vec<Record> {
        if !ctx.selection.is_empty() {
            return ctx.selection.clone();
        }
        self.grid
            .cursor_row()
            .map(|row| vec![row.record().clone()])
            .unwrap_or_default()
    }

    fn copy_action(&self, ctx: &Context) -> Action {
        let records = self.target_records(ctx);
        if records.is_empty() {
            return Action::Notify("Nothing to copy".to_string(), NotifyLevel::Warn);
        }
        Action::Copy(records_as_tsv(self.grid.columns(), &records))
    }

    fn export_action(&self, ctx: &Context) -> Action {
        let records = if ctx.selection.is_empty() {
            self.grid
                .visible_rows()
                .into_iter()
                .map(|row| row.record().clone())
                .collect()
        } else {
            ctx.selection.clone()
        };
        if records.is_empty() {
            return Action::Notify("No records to export".to_string(), NotifyLevel::Warn);
        }
        Action::Export(records)
    }

    fn sort_by_name(&mut self, name: &str) -> Action {
        let key = self
            .grid
            .columns()
            .iter()
            .find(|column| {
                column.key.eq_ignore_ascii_case(name) || column.label.eq_ignore_ascii_case(name)
            })
            .map(|column| column.key.clone());
        match key {
            Some(key) if self.grid.toggle_sort(&key) => Action::None,
            Some(key) => Action::Notify(format!("Column '{key}' is not sortable"), NotifyLevel::Warn),
            None => Action::Notify(format!("Unknown column: {name}"), NotifyLevel::Warn),
        }
    }
}

impl Module for AssignmentsPage {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.grid.move_cursor(1);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.grid.move_cursor(-1);
                Action::None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.grid.set_cursor(0);
                Action::None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.grid.set_cursor(usize::MAX);
                Action::None
            }
            KeyCode::Char(']') | KeyCode::Right | KeyCode::PageDown => {
                self.grid.next_page();
                Action::None
            }
            KeyCode::Char('[') | KeyCode::Left | KeyCode::PageUp => {
                self.grid.prev_page();
                Action::None
            }
            KeyCode::Char('.') => {
                self.grid.focus_column(true);
                Action::None
            }
            KeyCode::Char(',') => {
                self.grid.focus_column(false);
                Action::None
            }
            KeyCode::Char('s') => {
                if self.grid.toggle_sort_focused() {
                    Action::None
                } else {
                    Action::Notify("Column is not sortable".to_string(), NotifyLevel::Warn)
                }
            }
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Char(' ') => {
                let event = self.grid.toggle_cursor_row();
                self.apply_event(event, ctx)
            }
            KeyCode::Char('a') => {
                let event = self.grid.toggle_all_on_page();
                self.apply_event(event, ctx)
            }
            KeyCode::Char('x') => {
                let event = self.grid.clear_selection();
                self.apply_event(Some(event), ctx)
            }
            KeyCode::Char('r') => {
                let size = self.grid.cycle_page_size();
                Action::Notify(format!("Rows per page: {size}"), NotifyLevel::Info)
            }
            KeyCode::Enter => {
                let event = self.grid.activate_cursor_row();
                self.apply_event(event, ctx)
            }
            KeyCode::Char('o') => {
                let event = self.grid.cursor_cell_action();
                self.apply_event(event, ctx)
            }
            KeyCode::Char('y') => self.copy_action(ctx),
            KeyCode::Char('e') => self.export_action(ctx),
            KeyCode::Esc => {
                if self.grid.query().is_empty() {
                    Action::Navigate(NavigateTarget::Back)
                } else {
                    self.grid.clear_query();
                    Action::None
                }
            }
            _ => Action::None,
        }
    }

    fn handle_command(&mut self, cmd: &Command, ctx: &mut Context) -> Action {
        match cmd {
            Command::Page(page) => {
                self.grid.set_page(*page);
                Action::None
            }
            Command::Rows(rows) => {
                if self.grid.set_page_size(*rows) {
                    Action::None
                } else {
                    let options: Vec<String> = self
                        .grid
                        .page_size_options()
                        .iter()
                        .map(usize::to_string)
                        .collect();
                    Action::Notify(
                        format!("Rows must be one of {}", options.join(", ")),
                        NotifyLevel::Warn,
                    )
                }
            }
            Command::Sort(name) => self.sort_by_name(name),
            Command::Search(query) => {
                self.grid.set_query(query.clone());
                Action::None
            }
            Command::ClearSearch => {
                self.grid.clear_query();
                Action::None
            }
            Command::SelectPage => {
                let event = self.grid.toggle_all_on_page();
                self.apply_event(event, ctx)
            }
            Command::ClearSelection => {
                let event = self.grid.clear_selection();
                self.apply_event(Some(event), ctx)
            }
            Command::Copy => self.copy_action(ctx),
            Command::Export => self.export_action(ctx),
            _ => Action::None,
        }
    }
}

/// Tab separated lines of the raw column values (action-only columns skipped)
pub fn records_as_tsv(columns: &[ColumnSpec], records: &[Record]) -> String {
    let keys: Vec<&str> = columns
        .iter()
        .map(|column| column.key.as_str())
        .filter(|key| records.iter().any(|record| record.get(key).is_some()))
        .collect();
    records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| record.text(key))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

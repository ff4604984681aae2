//! Column descriptors

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::value::Record;

pub type RenderFn = Arc<dyn Fn(&Record) -> String + Send + Sync>;
pub type CompareFn = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

/// Row-scoped action attached to a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAction {
    /// Open the record in a detail view
    Inspect,
    /// Open the external link stored in `field`
    OpenLink { field: String },
}

/// Describes one displayed field.
///
/// Every capability is optional and resolved uniformly by the grid: a custom
/// render strategy, a custom comparator, a cell action, and whether the cell
/// swallows row interaction.
#[derive(Clone)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Preferred display width in terminal cells
    pub width: u16,
    render: Option<RenderFn>,
    comparator: Option<CompareFn>,
    action: Option<CellAction>,
    suppress_row_interaction: bool,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        let width = (label.chars().count() as u16 + 2).max(8);
        Self {
            key: key.into(),
            label,
            sortable: false,
            width,
            render: None,
            comparator: None,
            action: None,
            suppress_row_interaction: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn compare_by<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Attach a cell action. A cell with an action is an interactive element
    /// of its own, so it also stops row interaction.
    pub fn action(mut self, action: CellAction) -> Self {
        self.action = Some(action);
        self.suppress_row_interaction = true;
        self
    }

    pub fn suppress_row_interaction(mut self) -> Self {
        self.suppress_row_interaction = true;
        self
    }

    pub fn cell_action(&self) -> Option<&CellAction> {
        self.action.as_ref()
    }

    pub fn suppresses_row_interaction(&self) -> bool {
        self.suppress_row_interaction
    }

    pub fn comparator(&self) -> Option<&CompareFn> {
        self.comparator.as_ref()
    }

    /// Display text for this column in `record`
    pub fn display(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => render(record),
            None => record.text(&self.key),
        }
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("action", &self.action)
            .field("suppress_row_interaction", &self.suppress_row_interaction)
            .finish()
    }
}

//! Pages mounted in the shell outlet
//!
//! - home: dataset summary
//! - assignments: completed / ongoing lists on top of the DataGrid
//! - assign: placeholder for task assignment

pub mod assignments;

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Command, Context, Module, NavigateTarget};
use crate::data::{Dataset, Datasets};
use crate::grid::GridOptions;
use crate::nav::NavId;

pub use assignments::{AssignmentKind, AssignmentsPage};

/// Counts shown on the home page
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub title: &'static str,
    pub count: usize,
    pub source: String,
}

impl DatasetSummary {
    fn of(title: &'static str, dataset: &Dataset) -> Self {
        Self {
            title,
            count: dataset.len(),
            source: dataset.source.describe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomePage {
    pub datasets: Vec<DatasetSummary>,
}

impl HomePage {
    pub fn new(datasets: &Datasets) -> Self {
        Self {
            datasets: vec![
                DatasetSummary::of(NavId::Completed.title(), &datasets.completed),
                DatasetSummary::of(NavId::Track.title(), &datasets.ongoing),
            ],
        }
    }
}

impl Module for HomePage {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Char('c') => Action::Navigate(NavigateTarget::Nav(NavId::Completed)),
            KeyCode::Char('t') => Action::Navigate(NavigateTarget::Nav(NavId::Track)),
            _ => Action::None,
        }
    }

    fn handle_command(&mut self, _cmd: &Command, _ctx: &mut Context) -> Action {
        Action::None
    }
}

/// The page currently mounted. Remounting creates fresh grid state.
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Assignments(AssignmentsPage),
    Assign,
}

impl Page {
    pub fn mount(id: NavId, datasets: &Datasets, options: &GridOptions) -> Self {
        tracing::debug!(page = id.title(), "mount");
        match id {
            NavId::Home => Page::Home(HomePage::new(datasets)),
            NavId::Completed => Page::Assignments(AssignmentsPage::new(
                AssignmentKind::Completed,
                datasets.completed.records.clone(),
                options.clone(),
            )),
            NavId::Track => Page::Assignments(AssignmentsPage::new(
                AssignmentKind::Ongoing,
                datasets.ongoing.records.clone(),
                options.clone(),
            )),
            NavId::Assign => Page::Assign,
        }
    }

    pub fn assignments(&self) -> Option<&AssignmentsPage> {
        match self {
            Page::Assignments(page) => Some(page),
            _ => None,
        }
    }

    pub fn assignments_mut(&mut self) -> Option<&mut AssignmentsPage> {
        match self {
            Page::Assignments(page) => Some(page),
            _ => None,
        }
    }
}

impl Module for Page {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        match self {
            Page::Home(page) => page.handle_key(key, ctx),
            Page::Assignments(page) => page.handle_key(key, ctx),
            Page::Assign => match key.code {
                KeyCode::Esc => Action::Navigate(NavigateTarget::Back),
                _ => Action::None,
            },
        }
    }

    fn handle_command(&mut self, cmd: &Command, ctx: &mut Context) -> Action {
        match self {
            Page::Home(page) => page.handle_command(cmd, ctx),
            Page::Assignments(page) => page.handle_command(cmd, ctx),
            Page::Assign => Action::None,
        }
    }
}

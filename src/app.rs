use std::time::{Duration, Instant};

use crate::core::{parse_command, Action, Command, Context, Module, NavigateTarget, NotifyLevel};
use crate::data::{DataError, Datasets};
use crate::grid::{GridOptions, Record};
use crate::modules::export;
use crate::nav::{NavId, RouteChange, Router};
use crate::pages::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Side effects the event loop performs outside the app state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Put text on the system clipboard
    Clipboard { text: String, label: String },
}

#[derive(Debug)]
pub struct App {
    /// Shared context for pages
    pub ctx: Context,
    pub router: Router,
    pub page: Page,
    /// Nav id the current page was mounted for
    mounted: NavId,
    pub datasets: Datasets,
    pub grid_options: GridOptions,
    pub focus: Focus,
    pub sidebar_index: usize,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    /// Record shown in the detail overlay
    pub inspected: Option<Record>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_effects: Vec<Effect>,
}

impl App {
    pub fn new(datasets: Datasets, grid_options: GridOptions, initial_route: &str) -> Self {
        let router = Router::new(initial_route);
        let mounted = router.active();
        let page = Page::mount(mounted, &datasets, &grid_options);
        let mut app = Self {
            ctx: Context::new(),
            sidebar_index: nav_index(mounted),
            router,
            page,
            mounted,
            datasets,
            grid_options,
            focus: Focus::Page,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            inspected: None,
            help_open: false,
            should_quit: false,
            pending_effects: Vec::new(),
        };
        app.ctx.location = app.router.location().to_string();
        if NavId::resolve(initial_route).is_none() {
            app.set_status(
                format!("Unknown route {initial_route}, showing home"),
                StatusLevel::Warn,
            );
        }
        app
    }

    pub fn active(&self) -> NavId {
        self.router.active()
    }

    pub fn mounted(&self) -> NavId {
        self.mounted
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(4) {
                self.status = None;
            }
        }
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    // === Navigation ===

    /// Nav item activation (sidebar, shortcuts, `:completed`, ...)
    pub fn activate(&mut self, id: NavId) {
        let change = self.router.activate(id);
        tracing::debug!(?id, ?change, "nav activate");
        self.sync_page();
    }

    pub fn navigate(&mut self, path: &str) {
        let change = self.router.navigate(path);
        if let RouteChange::Redirected { from } = &change {
            tracing::info!(from = %from, "unknown route, redirecting home");
            self.set_status(format!("Unknown route {from}, showing home"), StatusLevel::Warn);
        }
        self.sync_page();
    }

    pub fn back(&mut self) {
        if self.router.back() {
            self.sync_page();
        }
    }

    /// Remount the outlet when the active destination changed
    fn sync_page(&mut self) {
        let active = self.router.active();
        self.ctx.location = self.router.location().to_string();
        self.sidebar_index = nav_index(active);
        if active == self.mounted {
            return;
        }
        self.page = Page::mount(active, &self.datasets, &self.grid_options);
        self.mounted = active;
        self.ctx.selection.clear();
        self.inspected = None;
        if self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
            self.command.input.clear();
        }
    }

    pub fn cycle_sidebar(&mut self, forward: bool) {
        let len = NavId::ALL.len();
        self.sidebar_index = if forward {
            (self.sidebar_index + 1) % len
        } else {
            (self.sidebar_index + len - 1) % len
        };
    }

    pub fn activate_sidebar(&mut self) {
        if let Some(id) = NavId::ALL.get(self.sidebar_index).copied() {
            self.activate(id);
            self.focus = Focus::Page;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Page,
            Focus::Page => Focus::Sidebar,
        };
    }

    // === Command bar ===

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        self.command.last = Some(input.clone());
        let cmd = parse_command(&input);
        tracing::debug!(?cmd, "command");
        self.run_command(&cmd);
    }

    pub fn run_command(&mut self, cmd: &Command) {
        match cmd {
            Command::Nav(id) => self.activate(*id),
            Command::Go(path) => self.navigate(path),
            Command::Back => self.back(),
            Command::Help => self.help_open = true,
            Command::Quit => self.should_quit = true,
            Command::Unknown(raw) => {
                self.set_status(format!("Unknown command: {raw}"), StatusLevel::Warn)
            }
            _ => {
                if self.page.assignments().is_none() {
                    self.set_status("Command needs an assignment list", StatusLevel::Warn);
                    return;
                }
                let action = self.page.handle_command(cmd, &mut self.ctx);
                self.dispatch(action);
            }
        }
    }

    // === Search input ===

    pub fn enter_search(&mut self) {
        let Some(page) = self.page.assignments() else {
            return;
        };
        self.command.input = page.grid().query().to_string();
        self.input_mode = InputMode::Search;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.command.input.push(c);
        self.update_query();
    }

    pub fn pop_search_char(&mut self) {
        self.command.input.pop();
        self.update_query();
    }

    pub fn clear_search_input(&mut self) {
        self.command.input.clear();
        self.update_query();
    }

    /// Keep the typed query and return to normal mode
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    /// Drop the query entirely
    pub fn cancel_search(&mut self) {
        self.clear_search_input();
        self.finish_search();
    }

    fn update_query(&mut self) {
        let query = self.command.input.clone();
        if let Some(page) = self.page.assignments_mut() {
            page.grid_mut().set_query(query);
        }
    }

    // === Overlays ===

    pub fn close_overlay(&mut self) -> bool {
        if self.help_open {
            self.help_open = false;
            return true;
        }
        self.inspected.take().is_some()
    }

    // === Actions ===

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(NavigateTarget::Back) => self.back(),
            Action::Navigate(NavigateTarget::Nav(id)) => self.activate(id),
            Action::Inspect(record) => self.inspected = Some(record),
            Action::OpenLink(link) => {
                tracing::info!(link = %link, "open proof of delivery");
                self.pending_effects.push(Effect::Clipboard {
                    label: format!("Proof of delivery link copied: {link}"),
                    text: link,
                });
            }
            Action::Copy(text) => {
                let lines = text.lines().count();
                self.pending_effects.push(Effect::Clipboard {
                    text,
                    label: format!("Copied {lines} row(s)"),
                });
            }
            Action::Export(records) => {
                let action = match self.page.assignments() {
                    Some(page) => {
                        let prefix = match self.mounted {
                            NavId::Track => "ongoing",
                            _ => "completed",
                        };
                        export::export_records(prefix, page.grid().columns(), &records)
                    }
                    None => Action::Notify("Nothing to export here".to_string(), NotifyLevel::Warn),
                };
                self.dispatch(action);
            }
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::StartSearch => self.enter_search(),
        }
    }

    /// Startup warning for data files that fell back to samples; every
    /// failure is listed.
    pub fn report_load_errors(&mut self, errors: &[DataError]) {
        if errors.is_empty() {
            return;
        }
        let text = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        self.set_status(format!("{text}; using sample data"), StatusLevel::Warn);
    }

    /// Result of performing a clipboard effect
    pub fn apply_clipboard_result(&mut self, label: String, ok: bool) {
        if ok {
            self.set_status(label, StatusLevel::Info);
        } else {
            self.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}

pub fn nav_index(id: NavId) -> usize {
    NavId::ALL.iter().position(|nav| *nav == id).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(route: &str) -> App {
        App::new(Datasets::samples(), GridOptions::default(), route)
    }

    #[test]
    fn test_initial_route_mounts_page() {
        let app = app("/completed");
        assert_eq!(app.active(), NavId::Completed);
        assert_eq!(app.page.assignments().map(|p| p.total()), Some(14));
    }

    #[test]
    fn test_unknown_initial_route_warns() {
        let app = app("/invoices/1");
        assert_eq!(app.active(), NavId::Home);
        assert!(matches!(app.status_text(), Some((_, StatusLevel::Warn))));
    }

    #[test]
    fn test_remount_gives_fresh_grid_state() {
        let mut app = app("/completed");
        if let Some(page) = app.page.assignments_mut() {
            page.grid_mut().set_query("adam");
            page.grid_mut().toggle_row("0");
        }
        app.activate(NavId::Track);
        app.activate(NavId::Completed);
        let grid = app.page.assignments().expect("list page").grid();
        assert_eq!(grid.query(), "");
        assert_eq!(grid.selected_count(), 0);
        assert!(app.ctx.selection.is_empty());
    }

    #[test]
    fn test_activating_current_page_keeps_state() {
        let mut app = app("/completed");
        if let Some(page) = app.page.assignments_mut() {
            page.grid_mut().set_query("adam");
        }
        app.activate(NavId::Completed);
        assert_eq!(app.router.depth(), 1);
        assert_eq!(app.page.assignments().expect("list").grid().query(), "adam");
    }

    #[test]
    fn test_go_command_redirects_unknown() {
        let mut app = app("/track");
        app.command.input = "go /invoices/1261756".to_string();
        app.apply_command();
        assert_eq!(app.active(), NavId::Home);
        assert_eq!(app.ctx.location, "/");
        app.back();
        assert_eq!(app.active(), NavId::Track);
    }

    #[test]
    fn test_search_input_updates_grid_live() {
        let mut app = app("/completed");
        app.enter_search();
        for c in "mark".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.page.assignments().expect("list").grid().total_items(), 7);
        app.pop_search_char();
        app.finish_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.page.assignments().expect("list").grid().query(), "mar");
        app.enter_search();
        app.cancel_search();
        assert_eq!(app.page.assignments().expect("list").grid().total_items(), 14);
    }

    #[test]
    fn test_grid_command_off_list_page_warns() {
        let mut app = app("/");
        app.run_command(&Command::Page(2));
        assert!(matches!(app.status_text(), Some((_, StatusLevel::Warn))));
    }

    #[test]
    fn test_open_link_queues_clipboard_effect() {
        let mut app = app("/track");
        app.dispatch(Action::OpenLink("/pods/1.pdf".to_string()));
        let effects = app.take_effects();
        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], Effect::Clipboard { text, .. } if text == "/pods/1.pdf"));
        assert!(app.take_effects().is_empty());

        app.apply_clipboard_result("copied".to_string(), true);
        assert_eq!(app.status_text(), Some(("copied", StatusLevel::Info)));
        app.apply_clipboard_result("copied".to_string(), false);
        assert!(matches!(app.status_text(), Some((_, StatusLevel::Error))));
    }

    #[test]
    fn test_load_errors_all_reach_status() {
        let mut app = app("/");
        app.report_load_errors(&[]);
        assert!(app.status_text().is_none());

        let errors = [
            DataError::NotAnArray {
                path: "completed.json".into(),
            },
            DataError::NotAnArray {
                path: "ongoing.json".into(),
            },
        ];
        app.report_load_errors(&errors);
        let (text, level) = app.status_text().expect("status");
        assert_eq!(level, StatusLevel::Warn);
        assert!(text.starts_with("completed.json: expected"));
        assert!(text.contains("; ongoing.json: expected"));
        assert!(text.ends_with("using sample data"));
    }

    #[test]
    fn test_inspect_overlay_closes() {
        let mut app = app("/completed");
        app.dispatch(Action::Inspect(Record::new().with("invoice", "1")));
        assert!(app.inspected.is_some());
        assert!(app.close_overlay());
        assert!(!app.close_overlay());
    }
}

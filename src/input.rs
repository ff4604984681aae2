//! Keyboard and mouse routing for the shell.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, Focus, InputMode};
use crate::core::{Action, Module, NotifyLevel};
use crate::nav::NavId;
use crate::ui::grid::{hit_test, GridHit};
use crate::ui::layout::{self, rect_contains, rect_inner, UiAreas};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    if app.inspected.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_overlay();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.help_open = true;
            return;
        }
        KeyCode::Char(':') => {
            app.enter_command();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        KeyCode::Char('h') => {
            app.focus = Focus::Sidebar;
            return;
        }
        KeyCode::Char('l') => {
            app.focus = Focus::Page;
            return;
        }
        KeyCode::Char(c) => {
            if let Some(id) = NavId::from_shortcut(c) {
                app.activate(id);
                return;
            }
        }
        _ => {}
    }

    if app.focus == Focus::Sidebar {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.cycle_sidebar(true),
            KeyCode::Char('k') | KeyCode::Up => app.cycle_sidebar(false),
            KeyCode::Enter => app.activate_sidebar(),
            KeyCode::Esc => app.focus = Focus::Page,
            _ => {}
        }
        return;
    }

    let action = app.page.handle_key(key, &mut app.ctx);
    app.dispatch(action);
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            if app.command.input.pop().is_none() {
                app.exit_command();
            }
        }
        KeyCode::Up => {
            if let Some(last) = app.command.last.clone() {
                app.command.input = last;
            }
        }
        KeyCode::Char(c) => app.command.input.push(c),
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search_input()
        }
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, size: Rect) {
    if app.help_open || app.inspected.is_some() || app.input_mode == InputMode::Command {
        return;
    }
    let areas = layout::areas(size);
    let col = mouse.column;
    let row = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, areas, col, row),
        MouseEventKind::ScrollUp => handle_scroll(app, areas, col, row, true),
        MouseEventKind::ScrollDown => handle_scroll(app, areas, col, row, false),
        _ => {}
    }
}

fn handle_scroll(app: &mut App, areas: UiAreas, col: u16, row: u16, up: bool) {
    if rect_contains(areas.sidebar, col, row) {
        app.focus = Focus::Sidebar;
        app.cycle_sidebar(!up);
        return;
    }
    if rect_contains(areas.main, col, row) {
        app.focus = Focus::Page;
        if let Some(page) = app.page.assignments_mut() {
            page.grid_mut().move_cursor(if up { -1 } else { 1 });
        }
    }
}

fn handle_click(app: &mut App, areas: UiAreas, col: u16, row: u16) {
    if rect_contains(areas.sidebar, col, row) {
        let inner = rect_inner(areas.sidebar);
        if !rect_contains(inner, col, row) {
            return;
        }
        let idx = (row - inner.y) as usize;
        if let Some(id) = NavId::ALL.get(idx).copied() {
            app.activate(id);
            app.focus = Focus::Sidebar;
        }
        return;
    }

    if !rect_contains(areas.main, col, row) {
        return;
    }
    app.focus = Focus::Page;
    let hit = match app.page.assignments() {
        Some(page) => hit_test(layout::grid_areas(areas.main), page.grid(), col, row),
        None => None,
    };
    if let Some(hit) = hit {
        apply_grid_hit(app, hit);
    }
}

/// Perform the grid transition for a click
pub fn apply_grid_hit(app: &mut App, hit: GridHit) {
    if hit == GridHit::Search {
        app.enter_search();
        return;
    }
    if app.input_mode == InputMode::Search {
        app.finish_search();
    }
    let Some(page) = app.page.assignments_mut() else {
        return;
    };
    let grid = page.grid_mut();
    let event = match hit {
        GridHit::Search => None,
        GridHit::HeaderCheckbox => grid.toggle_all_on_page(),
        GridHit::Header(column) => {
            grid.set_focused_column(column);
            let key = grid.columns().get(column).map(|column| column.key.clone());
            if let Some(key) = key {
                grid.toggle_sort(&key);
            }
            None
        }
        GridHit::Checkbox(offset) => {
            grid.set_cursor(offset);
            let key = grid.row_at(offset).map(|row| row.key().to_string());
            key.and_then(|key| grid.toggle_row(&key))
        }
        GridHit::Cell { offset, column } => {
            grid.set_cursor(offset);
            grid.set_focused_column(column);
            let key = grid.row_at(offset).map(|row| row.key().to_string());
            key.and_then(|key| grid.interact_cell(&key, column))
        }
        GridHit::Prev => {
            grid.prev_page();
            None
        }
        GridHit::Next => {
            grid.next_page();
            None
        }
        GridHit::Rows => {
            let size = grid.cycle_page_size();
            app.dispatch(Action::Notify(
                format!("Rows per page: {size}"),
                NotifyLevel::Info,
            ));
            return;
        }
        GridHit::ClearSelection => Some(grid.clear_selection()),
    };
    let action = page.apply_event(event, &mut app.ctx);
    app.dispatch(action);
}

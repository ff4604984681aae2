//! Shell flows: navigation, page remounts, and list interaction driven by keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use dispatch::app::{App, Effect, InputMode};
use dispatch::data::Datasets;
use dispatch::grid::GridOptions;
use dispatch::input::handle_key;
use dispatch::nav::NavId;

fn app(route: &str) -> App {
    App::new(Datasets::samples(), GridOptions::default(), route)
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn test_unknown_route_lands_on_home() {
    let app = app("/nowhere");
    assert_eq!(app.active(), NavId::Home);
    assert_eq!(app.ctx.location, "/");
}

#[test]
fn test_redundant_nav_does_not_grow_history() {
    let mut app = app("/completed");
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.router.depth(), 1);
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.router.depth(), 2);
}

#[test]
fn test_search_sort_select_on_completed() {
    let mut app = app("/completed");
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "mark");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);

    // focus driver column and sort
    for _ in 0..5 {
        press(&mut app, KeyCode::Char('.'));
    }
    press(&mut app, KeyCode::Char('s'));
    {
        let grid = app.page.assignments().expect("list page").grid();
        assert_eq!(grid.sort().map(|s| s.key.as_str()), Some("driver"));
        assert_eq!(grid.total_items(), 7);
    }

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.ctx.selection.len(), 7);
    assert!(app.ctx.selection.iter().all(|r| r.text("driver") == "Mark"));

    press(&mut app, KeyCode::Char('x'));
    assert!(app.ctx.selection.is_empty());
}

#[test]
fn test_pod_download_queues_link() {
    let mut app = app("/track");
    // last column holds the download link
    for _ in 0..6 {
        press(&mut app, KeyCode::Char('.'));
    }
    press(&mut app, KeyCode::Char('o'));
    let effects = app.take_effects();
    assert_eq!(
        effects,
        vec![Effect::Clipboard {
            text: "/pods/1261756.pdf".to_string(),
            label: "Proof of delivery link copied: /pods/1261756.pdf".to_string(),
        }]
    );
    assert!(app.ctx.selection.is_empty());
}

#[test]
fn test_leaving_and_returning_resets_list_state() {
    let mut app = app("/completed");
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.page.assignments().expect("list").grid().page(), 2);
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.active(), NavId::Completed);
    assert_eq!(app.page.assignments().expect("list").grid().page(), 1);
}

#[test]
fn test_command_bar_paths() {
    let mut app = app("/");
    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "go /track");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active(), NavId::Track);
    assert_eq!(app.ctx.location, "/track");

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "go /track/42");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active(), NavId::Home);
    assert_eq!(app.ctx.location, "/");
    assert!(app.status_text().is_some());

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "quit");
    press(&mut app, KeyCode::Enter);
    assert!(app.should_quit);
}

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod grid;
pub mod layout;

use crate::app::{nav_index, App, Focus, InputMode, StatusLevel};
use crate::grid::Record;
use crate::nav::NavId;
use crate::pages::{HomePage, Page};

use layout::{centered_rect, grid_areas};

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_sidebar(f, areas.sidebar, app);
    draw_outlet(f, areas.main, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if let Some(record) = app.inspected.as_ref() {
        draw_detail_popup(f, areas.size, app, record);
    }
    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Dispatch",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Page", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}  ", app.active().title())),
        Span::styled("Route", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.ctx.location)),
    ]);
    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let right_line = Line::from(vec![
        Span::styled("Completed ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.datasets.completed.len())),
        Span::styled("Ongoing ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.datasets.ongoing.len().to_string()),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let active = app.active();
    let items: Vec<ListItem> = NavId::ALL
        .iter()
        .map(|id| {
            let is_active = *id == active;
            let mut spans = vec![
                Span::styled(
                    format!("{} ", id.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(id.title()),
            ];
            if is_active {
                spans.push(Span::raw(" *"));
            }
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Navigate")
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if app.focus == Focus::Sidebar {
        state.select(Some(app.sidebar_index));
    } else {
        state.select(Some(nav_index(active)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_outlet(f: &mut Frame, area: Rect, app: &App) {
    match &app.page {
        Page::Home(home) => draw_home(f, area, home, app.focus == Focus::Page),
        Page::Assignments(page) => {
            let areas = grid_areas(area);
            let title = Line::from(vec![
                Span::styled(
                    page.title(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("Total Assignments ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("[{}]", page.total()),
                    Style::default().fg(Color::LightCyan),
                ),
            ]);
            f.render_widget(Paragraph::new(title), areas.title);
            grid::render_grid(
                f,
                areas,
                page.grid(),
                app.focus == Focus::Page,
                app.input_mode == InputMode::Search,
            );
        }
        Page::Assign => {
            let lines = vec![
                Line::from(Span::styled(
                    NavId::Assign.title(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Task assignment is not available yet."),
                Line::from("Esc to go back, 2 / 3 for the assignment lists."),
            ];
            let paragraph = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}

fn draw_home(f: &mut Frame, area: Rect, home: &HomePage, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut lines = vec![
        Line::from(Span::styled(
            "Driver assignments",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for summary in &home.datasets {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<24}", summary.title),
                Style::default().fg(Color::LightCyan),
            ),
            Span::raw(format!("{:>5}", summary.count)),
            Span::styled(
                format!("  ({})", summary.source),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("c  Completed assignments"));
    lines.push(Line::from("t  Track ongoing assignments"));
    lines.push(Line::from("?  Help"));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Home")
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None => {
            let mut spans = vec![
                Span::styled("View ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}  ", app.active().title())),
            ];
            if let Some(page) = app.page.assignments() {
                let grid = page.grid();
                spans.push(Span::styled("Selected ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(format!("{}  ", grid.selected_count())));
                if !grid.query().is_empty() {
                    spans.push(Span::styled("Search ", Style::default().fg(Color::DarkGray)));
                    spans.push(Span::raw(grid.query().to_string()));
                }
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("home", "Go to home"),
        ("completed", "Completed assignments"),
        ("track", "Ongoing assignments"),
        ("assign", "Assign tasks"),
        ("go", "Go to a route path"),
        ("back", "Previous route"),
        ("page", "Jump to page N"),
        ("rows", "Rows per page"),
        ("sort", "Sort by column"),
        ("search", "Filter rows"),
        ("all", "Select page"),
        ("clear", "Clear selection"),
        ("copy", "Copy rows"),
        ("export", "Export CSV + JSON"),
        ("help", "Show help"),
        ("quit", "Quit"),
    ];

    let head = input.split_whitespace().next().unwrap_or_default();
    commands
        .into_iter()
        .find(|(cmd, _)| cmd.starts_with(head))
        .map(|(_, desc)| desc)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("completed | track | page N | sort FIELD | export");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Search => Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(app.command.input.clone()),
            Span::styled(
                "  (Enter=keep Esc=clear)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => action_hints(app),
    };

    f.render_widget(Paragraph::new(content), area);
}

fn action_hints(app: &App) -> Line<'static> {
    let hints = match &app.page {
        _ if app.focus == Focus::Sidebar => "j/k move  Enter open  Tab page  ? help",
        Page::Home(_) => "c completed  t track  1-4 nav  : command  ? help  q quit",
        Page::Assignments(_) => {
            "/ search  s sort  Space select  a page  [ ] pages  Enter details  o open  e export  ? help"
        }
        Page::Assign => "Esc back  1-4 nav  ? help",
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(72, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4        Home / Completed / Track / Assign"),
        Line::from("  Tab / h / l Sidebar or page focus"),
        Line::from("  Esc        Clear search, close, back"),
        Line::from("  Mouse      Click nav, headers, rows, pager"),
        Line::from(""),
        Line::from("Assignment lists"),
        Line::from("  j / k      Move cursor"),
        Line::from("  [ / ]      Prev / Next page"),
        Line::from("  , / .      Focus column"),
        Line::from("  s          Sort focused column"),
        Line::from("  /          Search"),
        Line::from("  Space      Toggle row selection"),
        Line::from("  a          Toggle page selection"),
        Line::from("  x          Clear selection"),
        Line::from("  r          Cycle rows per page"),
        Line::from("  Enter      Row details"),
        Line::from("  o          Cell action (invoice / POD)"),
        Line::from("  y          Copy rows"),
        Line::from("  e          Export CSV + JSON"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :go /path  :page N  :rows N  :sort FIELD"),
        Line::from("  :search TEXT  :clear  :export  :quit"),
        Line::from(""),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_detail_popup(f: &mut Frame, area: Rect, app: &App, record: &Record) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let labels: Vec<(&str, &str)> = app
        .page
        .assignments()
        .map(|page| {
            page.grid()
                .columns()
                .iter()
                .map(|column| (column.key.as_str(), column.label.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let mut lines: Vec<Line> = record
        .fields()
        .map(|(key, value)| {
            let label = labels
                .iter()
                .find(|(column, _)| *column == key)
                .map(|(_, label)| *label)
                .unwrap_or(key);
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("No data"));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let title = if record.text("invoice").is_empty() {
        "Assignment".to_string()
    } else {
        format!("Invoice {}", record.text("invoice"))
    };
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("comp"), Some("Completed assignments"));
        assert_eq!(command_hint("sort driver"), Some("Sort by column"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}

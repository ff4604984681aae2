//! DataGrid rendering and mouse hit-testing.
//!
//! Both sides share `column_widths` and `footer_segments`, so a click lands
//! on exactly what was drawn.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::layout::{rect_contains, rect_inner, GridAreas};
use crate::grid::{DataGrid, SortDirection};

const CHECKBOX_WIDTH: u16 = 3;
const COLUMN_SPACING: u16 = 1;

/// What a click on the grid landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHit {
    Search,
    HeaderCheckbox,
    Header(usize),
    Checkbox(usize),
    Cell { offset: usize, column: usize },
    Prev,
    Next,
    Rows,
    ClearSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterPart {
    Prev,
    Page,
    Next,
    Rows,
    Summary,
    ClearSelection,
    Gap,
}

/// Widths of the drawn columns, checkbox column first when selectable
pub fn column_widths(grid: &DataGrid) -> Vec<u16> {
    let mut widths = Vec::with_capacity(grid.columns().len() + 1);
    if grid.is_selectable() {
        widths.push(CHECKBOX_WIDTH);
    }
    widths.extend(grid.columns().iter().map(|column| column.width));
    widths
}

fn constraints(widths: &[u16]) -> Vec<Constraint> {
    let last = widths.len().saturating_sub(1);
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            if i == last {
                Constraint::Min(*width)
            } else {
                Constraint::Length(*width)
            }
        })
        .collect()
}

pub fn footer_segments(grid: &DataGrid) -> Vec<(FooterPart, String)> {
    let mut segments = vec![
        (FooterPart::Prev, "◀ Prev".to_string()),
        (FooterPart::Gap, "  ".to_string()),
        (
            FooterPart::Page,
            format!("Page {} / {}", grid.page(), grid.total_pages()),
        ),
        (FooterPart::Gap, "  ".to_string()),
        (FooterPart::Next, "Next ▶".to_string()),
        (FooterPart::Gap, "   ".to_string()),
        (FooterPart::Rows, format!("Rows {}", grid.page_size())),
        (FooterPart::Gap, "   ".to_string()),
        (FooterPart::Summary, grid.summary()),
    ];
    if grid.selected_count() > 0 {
        segments.push((FooterPart::Gap, "  ".to_string()));
        segments.push((FooterPart::ClearSelection, "[clear]".to_string()));
    }
    segments
}

/// Rows scrolled past so the cursor stays visible
fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if cursor >= visible {
        cursor.saturating_sub(visible.saturating_sub(1))
    } else {
        0
    }
}

fn header_label(grid: &DataGrid, index: usize) -> String {
    let Some(column) = grid.columns().get(index) else {
        return String::new();
    };
    if !column.sortable {
        return column.label.clone();
    }
    let indicator = grid
        .sort_direction(&column.key)
        .map(SortDirection::indicator)
        .unwrap_or("⇅");
    format!("{} {}", column.label, indicator)
}

pub fn render_grid(f: &mut Frame, areas: GridAreas, grid: &DataGrid, focused: bool, searching: bool) {
    render_search(f, areas.search, grid, searching);
    render_table(f, areas.table, grid, focused);
    render_footer(f, areas.footer, grid);
}

fn render_search(f: &mut Frame, area: Rect, grid: &DataGrid, searching: bool) {
    let border_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let line = if grid.query().is_empty() && !searching {
        Line::from(Span::styled(
            "Search... (/)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(grid.query().to_string())];
        if searching {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, area: Rect, grid: &DataGrid, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let header_style = Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    let mut header_cells = Vec::new();
    if grid.is_selectable() {
        let mark = if grid.is_all_page_selected() { "[x]" } else { "[ ]" };
        header_cells.push(Cell::from(mark));
    }
    for index in 0..grid.columns().len() {
        let mut style = header_style;
        if focused && index == grid.focused_column() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        header_cells.push(Cell::from(header_label(grid, index)).style(style));
    }

    let page_rows = grid.page_rows();
    let rows: Vec<Row> = page_rows
        .iter()
        .map(|row| {
            let selected = grid.is_selected(row.key());
            let mut cells = Vec::new();
            if grid.is_selectable() {
                cells.push(Cell::from(if selected { "[x]" } else { "[ ]" }));
            }
            for column in grid.columns() {
                let mut cell = Cell::from(column.display(row.record()));
                if column.cell_action().is_some() {
                    cell = cell.style(Style::default().fg(Color::LightBlue));
                }
                cells.push(cell);
            }
            let style = if selected {
                Style::default().fg(Color::LightGreen)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let highlight_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let widths = constraints(&column_widths(grid));
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(highlight_style);

    let mut state = TableState::default();
    if !page_rows.is_empty() {
        state.select(Some(grid.cursor()));
    }
    f.render_stateful_widget(table, area, &mut state);

    if page_rows.is_empty() {
        let inner = rect_inner(area);
        if inner.height > 1 {
            let empty = Rect {
                y: inner.y + 1,
                height: inner.height - 1,
                ..inner
            };
            let message = Paragraph::new("No records")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(message, empty);
        }
    }
}

fn render_footer(f: &mut Frame, area: Rect, grid: &DataGrid) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);
    let spans: Vec<Span> = footer_segments(grid)
        .into_iter()
        .map(|(part, text)| {
            let style = match part {
                FooterPart::Prev if !grid.has_prev() => disabled,
                FooterPart::Next if !grid.has_next() => disabled,
                FooterPart::Prev | FooterPart::Next => enabled.add_modifier(Modifier::BOLD),
                FooterPart::Summary | FooterPart::Rows => Style::default().fg(Color::Gray),
                FooterPart::ClearSelection => Style::default().fg(Color::Yellow),
                FooterPart::Page | FooterPart::Gap => enabled,
            };
            Span::styled(text, style)
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Map a terminal position onto the grid drawn in `areas`
pub fn hit_test(areas: GridAreas, grid: &DataGrid, col: u16, row: u16) -> Option<GridHit> {
    if rect_contains(areas.search, col, row) {
        return Some(GridHit::Search);
    }
    if rect_contains(areas.footer, col, row) {
        return footer_hit(areas.footer, grid, col);
    }
    if !rect_contains(areas.table, col, row) {
        return None;
    }
    let inner = rect_inner(areas.table);
    if !rect_contains(inner, col, row) {
        return None;
    }

    let column = column_at(inner, grid, col)?;
    if row == inner.y {
        return Some(match column {
            None => GridHit::HeaderCheckbox,
            Some(index) => GridHit::Header(index),
        });
    }

    let visible = inner.height.saturating_sub(1).max(1) as usize;
    let offset = scroll_offset(grid.cursor(), visible) + (row - inner.y - 1) as usize;
    if offset >= grid.page_rows().len() {
        return None;
    }
    Some(match column {
        None => GridHit::Checkbox(offset),
        Some(column) => GridHit::Cell { offset, column },
    })
}

/// `Some(None)` is the checkbox column, `Some(Some(i))` data column `i`
fn column_at(inner: Rect, grid: &DataGrid, col: u16) -> Option<Option<usize>> {
    let widths = column_widths(grid);
    let last = widths.len().checked_sub(1)?;
    let checkbox = grid.is_selectable();
    let mut x = inner.x;
    for (i, width) in widths.iter().enumerate() {
        let end = if i == last {
            inner.x.saturating_add(inner.width)
        } else {
            x.saturating_add(*width)
        };
        if col >= x && col < end {
            return Some(match (checkbox, i) {
                (true, 0) => None,
                (true, i) => Some(i - 1),
                (false, i) => Some(i),
            });
        }
        x = end.saturating_add(COLUMN_SPACING);
    }
    None
}

fn footer_hit(area: Rect, grid: &DataGrid, col: u16) -> Option<GridHit> {
    let mut x = area.x;
    for (part, text) in footer_segments(grid) {
        let end = x.saturating_add(text.chars().count() as u16);
        if col >= x && col < end {
            return match part {
                FooterPart::Prev => Some(GridHit::Prev),
                FooterPart::Next => Some(GridHit::Next),
                FooterPart::Rows => Some(GridHit::Rows),
                FooterPart::ClearSelection => Some(GridHit::ClearSelection),
                FooterPart::Page | FooterPart::Summary | FooterPart::Gap => None,
            };
        }
        x = end;
    }
    None
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub body: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(vertical[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        body: vertical[1],
        sidebar: body_chunks[0],
        main: body_chunks[1],
        footer: vertical[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// Regions of a list page inside the outlet
#[derive(Debug, Clone, Copy)]
pub struct GridAreas {
    pub title: Rect,
    pub search: Rect,
    pub table: Rect,
    pub footer: Rect,
}

pub fn grid_areas(main: Rect) -> GridAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(main);

    GridAreas {
        title: chunks[0],
        search: chunks[1],
        table: chunks[2],
        footer: chunks[3],
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Area inside a bordered block
pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_fill_terminal() {
        let size = Rect::new(0, 0, 120, 40);
        let areas = areas(size);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(areas.main.x, SIDEBAR_WIDTH);
        assert_eq!(areas.main.width, 120 - SIDEBAR_WIDTH);
        assert_eq!(areas.status_line.y, 38);
        assert_eq!(areas.command_line.y, 39);
    }

    #[test]
    fn test_grid_areas_stack() {
        let grid = grid_areas(Rect::new(26, 3, 94, 35));
        assert_eq!(grid.title.y, 3);
        assert_eq!(grid.search.y, 4);
        assert_eq!(grid.table.y, 7);
        assert_eq!(grid.footer.y, 37);
        assert_eq!(grid.table.height, 30);
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::new(2, 2, 10, 4);
        assert!(rect_contains(rect, 2, 2));
        assert!(!rect_contains(rect, 12, 2));
        assert_eq!(rect_inner(rect), Rect::new(3, 3, 8, 2));
    }
}

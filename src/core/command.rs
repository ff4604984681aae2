//! Command parser for the : command system

use crate::nav::NavId;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Nav(NavId),
    Go(String),
    Back,

    // Grid commands
    Page(usize),
    Rows(usize),
    Sort(String),
    Search(String),
    ClearSearch,
    SelectPage,
    ClearSelection,

    // Output commands
    Copy,
    Export,

    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "home" => Command::Nav(NavId::Home),
        "completed" | "done" => Command::Nav(NavId::Completed),
        "track" | "ongoing" => Command::Nav(NavId::Track),
        "assign" => Command::Nav(NavId::Assign),
        "go" | "open" => match args {
            Some(path) => Command::Go(path),
            None => Command::Unknown(input.to_string()),
        },
        "back" => Command::Back,

        // Grid
        "page" | "p" => match args.and_then(|s| s.parse().ok()) {
            Some(page) => Command::Page(page),
            None => Command::Unknown(input.to_string()),
        },
        "rows" | "size" => match args.and_then(|s| s.parse().ok()) {
            Some(rows) => Command::Rows(rows),
            None => Command::Unknown(input.to_string()),
        },
        "sort" => match args {
            Some(field) => Command::Sort(field),
            None => Command::Unknown(input.to_string()),
        },
        "search" | "find" => match args {
            Some(query) => Command::Search(query),
            None => Command::ClearSearch,
        },
        "nosearch" => Command::ClearSearch,
        "all" | "selectall" => Command::SelectPage,
        "clear" | "none" => Command::ClearSelection,

        // Output
        "copy" | "yank" => Command::Copy,
        "export" => Command::Export,

        "help" => Command::Help,
        "quit" | "q" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("completed"), Command::Nav(NavId::Completed));
        assert_eq!(parse_command("ongoing"), Command::Nav(NavId::Track));
        assert_eq!(parse_command("  HOME "), Command::Nav(NavId::Home));
        assert_eq!(
            parse_command("go /track"),
            Command::Go("/track".to_string())
        );
        assert_eq!(parse_command("go"), Command::Unknown("go".to_string()));
    }

    #[test]
    fn test_parse_grid_commands() {
        assert_eq!(parse_command("page 3"), Command::Page(3));
        assert_eq!(parse_command("rows 20"), Command::Rows(20));
        assert_eq!(
            parse_command("page three"),
            Command::Unknown("page three".to_string())
        );
        assert_eq!(
            parse_command("sort postcode"),
            Command::Sort("postcode".to_string())
        );
        assert_eq!(
            parse_command("search Adam Smith"),
            Command::Search("Adam Smith".to_string())
        );
        assert_eq!(parse_command("search"), Command::ClearSearch);
        assert_eq!(parse_command("clear"), Command::ClearSelection);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}

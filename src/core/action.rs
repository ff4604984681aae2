//! Actions that modules return to communicate with the app

use crate::grid::Record;
use crate::nav::NavId;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate to a destination or raw path
    Navigate(NavigateTarget),

    /// Open a record in the detail overlay
    Inspect(Record),

    /// Open an external link (proof of delivery)
    OpenLink(String),

    /// Copy text to the clipboard
    Copy(String),

    /// Write records to the exports directory
    Export(Vec<Record>),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Enter search input for the current page
    StartSearch,
}

/// Navigation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateTarget {
    /// Go back to previous location
    Back,
    /// Activate a nav item
    Nav(NavId),
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

//! Shared context passed to modules

use crate::grid::Record;

/// Shared context available to all modules
#[derive(Debug, Default)]
pub struct Context {
    /// Last selection reported by the mounted grid; copy and export act on it
    pub selection: Vec<Record>,

    /// Current route
    pub location: String,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}

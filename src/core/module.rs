//! Module trait for pages that own their input handling

use crossterm::event::KeyEvent;

use super::{Action, Command, Context};

/// A page mounted in the shell outlet
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action;

    /// Handle a page-scoped `:` command
    fn handle_command(&mut self, cmd: &Command, ctx: &mut Context) -> Action;
}

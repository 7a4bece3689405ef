//! Terminal rendering for the mine, the status panels, and the menu.
pub mod terminal;
pub mod theme;
pub mod ui;
mod widgets;

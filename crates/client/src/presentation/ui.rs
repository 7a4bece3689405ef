//! Main render entry point composing every widget.
use anyhow::Result;
use mine_core::GameState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::presentation::{terminal::Tui, widgets};
use crate::state::AppState;

/// Everything a frame needs, borrowed from the session and the app.
pub struct RenderContext<'a> {
    pub game: &'a GameState,
    pub app: &'a AppState,
    pub pickaxe_cost: u32,
    pub energy_cost: u32,
}

const MESSAGE_PANEL_HEIGHT: u16 = 6;
const SIDE_PANEL_WIDTH: u16 = 30;

/// Draws the mine with its side panels, and the menu on top when open.
pub fn render(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    terminal.draw(|frame| {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),                       // Mine + side panel
                Constraint::Length(MESSAGE_PANEL_HEIGHT), // Messages
                Constraint::Length(3),                    // Footer
            ])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(rows[0]);

        widgets::mine::render(frame, columns[0], ctx.game);
        widgets::stats::render(frame, columns[1], ctx.game);
        widgets::messages::render(frame, rows[1], &ctx.app.messages);
        widgets::footer::render(frame, rows[2], ctx.game);

        if ctx.game.menu_open() {
            let area = centered_rect(70, 80, frame.area());
            widgets::menu::render(frame, area, ctx);
        }
    })?;

    Ok(())
}

/// Create a centered rectangle for modal overlays.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

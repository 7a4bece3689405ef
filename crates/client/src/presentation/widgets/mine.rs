//! Mine viewport centered on the player.
use std::ops::Range;

use mine_core::GameState;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme;

/// Rows to draw so the player stays vertically centered when possible.
pub fn viewport(total_rows: u32, player_row: u32, height: u32) -> Range<u32> {
    if height >= total_rows {
        return 0..total_rows;
    }
    let start = player_row
        .saturating_sub(height / 2)
        .min(total_rows - height);
    start..start + height
}

pub fn render(frame: &mut Frame, area: Rect, game: &GameState) {
    let inner_height = u32::from(area.height.saturating_sub(2));
    let grid = &game.grid;
    let player = game.player;

    let lines: Vec<Line> = viewport(grid.rows(), player.y as u32, inner_height)
        .map(|row| {
            let spans: Vec<Span> = grid
                .row(row)
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if row as i32 == player.y && col as i32 == player.x {
                        Span::styled(theme::PLAYER_GLYPH.to_string(), theme::player_style())
                    } else {
                        let (glyph, style) = theme::cell(*cell);
                        Span::styled(glyph.to_string(), style)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!(" Mine: depth {} / {} ", player.y, grid.rows());
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_centers_and_clamps() {
        assert_eq!(viewport(15, 0, 40), 0..15);
        assert_eq!(viewport(200, 0, 20), 0..20);
        assert_eq!(viewport(200, 50, 20), 40..60);
        assert_eq!(viewport(200, 199, 20), 180..200);
    }
}

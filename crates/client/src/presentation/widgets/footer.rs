//! Footer widget displaying context-sensitive key bindings.
use mine_core::GameState;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, game: &GameState) {
    let text = if game.menu_open() {
        vec![Line::from(vec![
            Span::raw("[n] New game | "),
            Span::raw("[c] Continue | "),
            Span::raw("[s] Sell | "),
            Span::raw("[p] Pickaxe | "),
            Span::raw("[e] Energy | "),
            Span::raw("[l] Leaderboard | "),
            Span::raw("[ESC] Back | "),
            Span::raw("[q] Quit"),
        ])]
    } else {
        vec![Line::from(vec![
            Span::raw("[WASD/Arrows] Dig | "),
            Span::raw("[ESC] Menu | "),
            Span::raw("[q] Quit"),
        ])]
    };

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

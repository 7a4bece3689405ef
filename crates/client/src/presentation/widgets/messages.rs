//! Status message panel.
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::MessageLog;

pub fn render(frame: &mut Frame, area: Rect, messages: &MessageLog) {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = messages
        .recent(visible)
        .map(|line| Line::raw(line.as_str()))
        .collect();
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

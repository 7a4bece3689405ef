//! Glyphs and colors for mine cells and gauges.
use mine_core::{Cell, OreKind};
use ratatui::style::{Color, Modifier, Style};

pub const PLAYER_GLYPH: char = '@';

pub fn player_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Glyph and style for one cell. Ores use their persisted letter code.
pub fn cell(cell: Cell) -> (char, Style) {
    match cell {
        Cell::Empty => ('.', Style::default().fg(Color::DarkGray)),
        Cell::Wall => ('#', Style::default().fg(Color::Gray)),
        Cell::Ore(kind) => (kind.code(), ore_style(kind)),
    }
}

pub fn ore_style(kind: OreKind) -> Style {
    let color = match kind {
        OreKind::Coal => Color::DarkGray,
        OreKind::Iron => Color::LightRed,
        OreKind::Gold => Color::Yellow,
        OreKind::Diamond => Color::LightCyan,
        OreKind::Crystal => Color::LightMagenta,
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if kind.is_rare() {
        style.add_modifier(Modifier::ITALIC)
    } else {
        style
    }
}

/// Energy gauge color by remaining percentage.
pub fn energy_style(percent: f32) -> Style {
    let color = if percent > 50.0 {
        Color::Green
    } else if percent > 20.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ores_render_with_their_codes() {
        assert_eq!(cell(Cell::DIAMOND).0, 'D');
        assert_eq!(cell(Cell::Wall).0, '#');
        assert_eq!(cell(Cell::Empty).0, '.');
    }
}

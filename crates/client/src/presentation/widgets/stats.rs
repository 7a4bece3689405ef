//! Player stats and inventory panel.
use mine_core::{GameState, OreKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::presentation::theme;

pub fn render(frame: &mut Frame, area: Rect, game: &GameState) {
    let economy = &game.economy;
    let progress = &game.progress;
    let label = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Coins: ", label),
            Span::styled(economy.coins.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("Energy: ", label),
            Span::styled(
                format!("{}/{}", economy.energy, economy.max_energy),
                theme::energy_style(economy.energy_percent()),
            ),
        ]),
        Line::from(vec![
            Span::styled("Pickaxe: ", label),
            Span::raw(format!("level {}", economy.pickaxe_level)),
        ]),
        Line::from(vec![
            Span::styled("Depth: ", label),
            Span::raw(format!("{} (max {})", game.player.y, progress.max_depth_reached)),
        ]),
        Line::from(vec![
            Span::styled("Rare ores: ", label),
            Span::raw(progress.total_rare_ores_collected.to_string()),
        ]),
        Line::raw(""),
        Line::styled("Inventory", label),
    ];
    lines.extend(ore_rows(game));
    lines.push(Line::from(vec![
        Span::styled("Value: ", label),
        Span::raw(format!("{} coins", game.inventory.value())),
    ]));
    if game.is_game_over() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("OUT OF ENERGY", Style::default().fg(Color::Red)));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Miner "));
    frame.render_widget(paragraph, area);
}

fn ore_rows(game: &GameState) -> impl Iterator<Item = Line<'static>> + '_ {
    OreKind::iter().map(move |kind| {
        Line::from(vec![
            Span::styled(format!("  {} ", kind.code()), theme::ore_style(kind)),
            Span::raw(format!("{:<8}{:>4}", kind.to_string(), game.inventory.count(kind))),
        ])
    })
}

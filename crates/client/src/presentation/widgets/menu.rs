//! Menu overlay with the shop and the leaderboard.
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::presentation::ui::RenderContext;

pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title(" Deep Mine ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    render_shop(frame, columns[0], ctx);
    render_leaderboard(frame, columns[1], ctx);
}

fn render_shop(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let coins = ctx.game.economy.coins;
    let affordable = |cost: u32| {
        if coins >= cost {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut lines = vec![
        Line::styled("Game", heading),
        Line::raw("[n] New game"),
        Line::raw("[c] Continue"),
        Line::raw(""),
    ];
    if ctx.game.is_playing() {
        lines.extend([
            Line::styled("Shop", heading),
            Line::raw(format!("[s] Sell ores ({} coins)", ctx.game.inventory.value())),
            Line::from(vec![
                Span::raw("[p] Pickaxe level "),
                Span::raw((ctx.game.economy.pickaxe_level + 1).to_string()),
                Span::styled(format!(" - {} coins", ctx.pickaxe_cost), affordable(ctx.pickaxe_cost)),
            ]),
            Line::from(vec![
                Span::raw("[e] +20 energy"),
                Span::styled(format!(" - {} coins", ctx.energy_cost), affordable(ctx.energy_cost)),
            ]),
            Line::raw(""),
            Line::raw(format!("Coins: {}", coins)),
        ]);
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = vec![Line::styled(
        format!("Top {} by coins", ctx.app.leaderboard_size),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if ctx.app.leaderboard.is_empty() {
        lines.push(Line::raw("No entries yet"));
    }
    for (rank, entry) in ctx.app.leaderboard.iter().enumerate() {
        lines.push(Line::raw(format!(
            "{:>2}. {} {:<14} {:>6}c  d{:<3} r{}",
            rank + 1,
            entry.avatar,
            entry.display_name,
            entry.coins,
            entry.max_depth,
            entry.rare_ores
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::LEFT)),
        area,
    );
}

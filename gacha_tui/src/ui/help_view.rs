//! Help tab view

use super::section;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let config = app.engine.config();
    let lines = vec![
        section("Navigation"),
        key_line("1-5", "Jump to tab (Pull/Rates/Stats/Log/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll / adjust pity"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section("Pulling"),
        key_line("Space / Enter", "Single pull"),
        key_line("x", "Ten pulls in a row"),
        key_line("r", "Reset pity counter"),
        key_line("c", "Clear history"),
        key_line("s", "Simulate 10,000 pulls (Stats tab)"),
        Line::from(""),
        section("Pity Mechanics"),
        Line::from(""),
        Line::from(Span::styled("Soft pity:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  From pull {} on, rates blend linearly toward the hard-pity table",
            config.soft_pity_start()
        )),
        Line::from("  Rate = Base × (1 - progress) + Guaranteed × progress"),
        Line::from(""),
        Line::from(Span::styled("Hard pity:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Pull {} without a high-rarity result is always high rarity",
            config.hard_pity()
        )),
        Line::from("  High tiers keep their relative base odds"),
        Line::from(""),
        Line::from(Span::styled("Counter:", Style::default().fg(Color::Yellow))),
        Line::from("  High-rarity result resets to 0, anything else adds 1"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Mechanics "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}

//! Rates tab view - rate table at an arbitrary pity counter

use super::{rate_line, section, stat_line};
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
    let bar_width = area.width.saturating_sub(28) as usize;

    let mut lines = vec![
        section("Banner"),
        stat_line("Soft pity starts at", config.soft_pity_start().to_string()),
        stat_line("Hard pity at", config.hard_pity().to_string()),
        stat_line(
            "High-rarity tiers",
            config
                .high_rarity_tiers()
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Line::from(""),
        section(&format!("Rates at pity {}", app.preview_counter)),
        Line::from(""),
    ];

    match app.preview_rates() {
        Ok(table) => {
            lines.extend(table.iter().map(|(tier, rate)| rate_line(tier, rate, bar_width)));
            lines.push(Line::from(""));
            lines.push(stat_line(
                "High-rarity combined",
                format!("{:.3}%", table.high_rarity_rate(config)),
            ));
            lines.push(stat_line(
                "Soft pity progress",
                format!("{:.1}%", config.progress(u32::try_from(app.preview_counter).unwrap_or(0)) * 100.0),
            ));
            lines.push(stat_line("Table total", format!("{:.6}%", table.total())));
        }
        Err(e) => {
            lines.push(Line::from(Span::styled(
                e.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Rate Explorer "));
    f.render_widget(paragraph, area);
}

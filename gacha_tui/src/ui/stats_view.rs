//! Stats tab view

use super::{section, stat_line, tier_color};
use crate::app::App;
use gacha_core::RarityTier;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_session(f, app, columns[0]);
    draw_odds(f, app, columns[1]);
}

fn draw_session(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        section("Session"),
        stat_line("Total pulls", app.total_pulls.to_string()),
        Line::from(""),
    ];

    for tier in RarityTier::regular() {
        let count = app.tier_counts.get(tier).copied().unwrap_or(0);
        let rate = if app.total_pulls > 0 {
            f64::from(count) / f64::from(app.total_pulls) * 100.0
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:12}", tier.name()), Style::default().fg(tier_color(*tier))),
            Span::styled(format!("{:>6}", count), Style::default().fg(Color::White)),
            Span::styled(format!("  {:>6.2}%", rate), Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some(sim) = &app.simulation {
        lines.push(Line::from(""));
        lines.push(section(&format!("Simulation ({} pulls)", sim.total_pulls)));
        for tier in RarityTier::regular() {
            lines.push(stat_line(
                tier.name(),
                format!("{:.2}%", sim.observed_rate(*tier)),
            ));
        }
        lines.push(stat_line(
            "Pulls per high-rarity",
            format!("{:.2}", sim.pulls_per_high_rarity()),
        ));
        lines.push(stat_line("Hard pity triggers", sim.hard_pity_hits.to_string()));
        lines.push(stat_line("Longest drought", sim.longest_drought.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Pull Statistics "));
    f.render_widget(paragraph, area);
}

fn draw_odds(f: &mut Frame, app: &App, area: Rect) {
    let hard = app.engine.config().hard_pity();
    let soft = app.engine.config().soft_pity_start();

    let mut lines = vec![
        section("Odds per pity cycle"),
        stat_line(
            "Expected pulls",
            format!("{:.2}", app.expected_pulls()),
        ),
        Line::from(""),
    ];

    let checkpoints = [10, soft / 2, soft, (soft + hard) / 2, hard.saturating_sub(1), hard];
    let mut seen = Vec::new();
    for pulls in checkpoints {
        if pulls == 0 || seen.contains(&pulls) {
            continue;
        }
        seen.push(pulls);
        lines.push(stat_line(
            &format!("High rarity within {}", pulls),
            format!("{:.2}%", app.high_rarity_within(pulls) * 100.0),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Analysis "));
    f.render_widget(paragraph, area);
}

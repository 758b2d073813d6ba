//! Pull tab view - pity gauge, next-pull rates and history

use super::{progress_bar, rate_line, section, tier_color};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_status(f, app, columns[0]);
    draw_history(f, app, columns[1]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Pity gauge
            Constraint::Min(0),    // Rates
        ])
        .split(area);

    let pity = app.current_pity();
    let hard = app.engine.config().hard_pity();
    let soft = app.engine.config().soft_pity_start();

    let gauge_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Pity {} / {} ({}) ", pity, hard, app.user));
    let inner = gauge_block.inner(rows[0]);
    f.render_widget(gauge_block, rows[0]);

    let (note, color) = pity_note(pity, soft, hard);
    f.render_widget(
        progress_bar(f64::from(pity), f64::from(hard), inner.width, color),
        Rect { height: 1, ..inner },
    );
    if inner.height > 1 {
        f.render_widget(
            Paragraph::new(note).style(Style::default().fg(Color::DarkGray)),
            Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            },
        );
    }

    let table = app.next_pull_rates();
    let bar_width = rows[1].width.saturating_sub(26) as usize;
    let mut lines = vec![section("Next Pull"), Line::from("")];
    lines.extend(table.iter().map(|(tier, rate)| rate_line(tier, rate, bar_width)));
    lines.push(Line::from(""));
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Rates "));
    f.render_widget(paragraph, rows[1]);
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .history
        .iter()
        .skip(app.history_scroll)
        .map(|pull| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<12}", pull.rarity.name()),
                    Style::default().fg(tier_color(pull.rarity)),
                ),
                Span::styled(pull.character.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  (pity {} → {})", pull.pity_before, pull.new_counter),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if pull.hard_pity_triggered {
                spans.push(Span::styled(
                    "  HARD PITY",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" History ({} pulls) ", app.total_pulls)),
    );
    f.render_widget(list, area);
}

/// Gauge caption and color for the next pull
fn pity_note(pity: u32, soft: u32, hard: u32) -> (String, Color) {
    let pull_number = pity.saturating_add(1);
    if pull_number >= hard {
        ("Next pull is guaranteed".to_string(), Color::Yellow)
    } else if pull_number >= soft {
        ("Soft pity active".to_string(), Color::Yellow)
    } else {
        (format!("Soft pity in {} pulls", soft - pull_number), Color::Green)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pity_note() {
        assert_eq!(pity_note(0, 50, 100), ("Soft pity in 49 pulls".to_string(), Color::Green));
        assert_eq!(pity_note(49, 50, 100).0, "Soft pity active");
        assert_eq!(pity_note(99, 50, 100).0, "Next pull is guaranteed");
        assert_eq!(pity_note(u32::MAX, 50, 100).0, "Next pull is guaranteed");
    }
}

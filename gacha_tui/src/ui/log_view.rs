//! Log tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .log_lines()
        .into_iter()
        .rev()
        .skip(app.log_scroll)
        .map(|line| {
            let color = if line.starts_with("[ERROR]") {
                Color::Red
            } else if line.starts_with("[WARN") {
                Color::Yellow
            } else {
                Color::Gray
            };
            Line::styled(line, Style::default().fg(color))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Log (newest first) "));
    f.render_widget(paragraph, area);
}

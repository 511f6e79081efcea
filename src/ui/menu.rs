use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::GAME_OVER_COLOR;
use crate::game::EndReason;

/// Draws the end-of-game screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reason: Option<EndReason>,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let (headline, title) = match reason {
        Some(EndReason::BoardFull) => ("Board full! Nowhere left for food.", " stalemate "),
        _ => ("Game over!", " game over "),
    };

    let lines = vec![
        Line::from(headline).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Your score is {score}")),
        Line::from(""),
        Line::from("Press 'q' to quit").style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(GAME_OVER_COLOR))
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

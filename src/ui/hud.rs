use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::HUD_SCORE_COLOR;

/// Status line drawn into the top frame row.
#[must_use]
pub fn status_line(score: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" Score: {score} "),
            Style::new()
                .fg(HUD_SCORE_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Press 'q' to quit ", Style::new().fg(Color::DarkGray)),
    ])
}

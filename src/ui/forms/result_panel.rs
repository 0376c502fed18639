//! Confirmation shown after a successful submission

use crate::platform::COPY_SHORTCUT;
use crate::state::SuccessBlock;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, block: &SuccessBlock) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("✓ {}", block.message),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Reference Number: ", label),
            Span::styled(
                block.reference_number.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({COPY_SHORTCUT} to copy)"), label),
        ]),
    ];

    let rows = [
        ("Name", &block.full_name),
        ("Status", &block.status),
        ("Package", &block.package_name),
        ("Phone", &block.phone),
    ];
    for (name, value) in rows {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::raw(value.clone()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        block.note,
        Style::default().fg(Color::Blue),
    )));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Application Submitted "),
    );
    frame.render_widget(panel, area);
}

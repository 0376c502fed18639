//! Supervisor applications list

use super::widgets::{render_scrollable_list, status_color};
use crate::app::App;
use crate::state::{time_slot_name, ApplicationRecord};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the applications list with the selected application's details
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let visible = dashboard.visible_applications();

    let block = Block::default()
        .title(format!(" Applications ({}) ", visible.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if visible.is_empty() {
        let content = Paragraph::new("No applications found.\nPress 'f' to change the filter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Filter: {}", dashboard.filter.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [f]cycle", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(
            format!("Sort: {}", dashboard.sort.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [s]toggle", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let is_selected = idx == dashboard.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{:<14}", record.reference_number),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("[{}]", record.status.label()),
                    Style::default().fg(status_color(record.status)),
                ),
                Span::raw(" "),
                Span::styled(record.full_name(), style),
                Span::styled(
                    format!("  {}", record.created_at.format("%Y-%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, chunks[1], list, dashboard.selected_index);

    if let Some(record) = dashboard.selected_application() {
        frame.render_widget(detail(record), chunks[2]);
    }
}

fn detail(record: &ApplicationRecord) -> Paragraph<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let pickup = match (&record.preferred_date, &record.preferred_time) {
        (Some(date), Some(time)) => format!("{date}, {}", time_slot_name(time)),
        (Some(date), None) => date.clone(),
        _ => "Not scheduled".to_string(),
    };
    let family = if record.family_size.is_empty() {
        "-".to_string()
    } else {
        record.family_size.clone()
    };

    Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Phone: ", label),
            Span::raw(record.phone.clone()),
            Span::styled("   Family size: ", label),
            Span::raw(family),
        ]),
        Line::from(vec![
            Span::styled("Package: ", label),
            Span::raw(record.selected_package.clone()),
        ]),
        Line::from(vec![Span::styled("Pickup: ", label), Span::raw(pickup)]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Details "),
    )
}

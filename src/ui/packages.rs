//! Supervisor package inventory

use super::widgets::{render_scrollable_list, stock_color};
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let block = Block::default()
        .title(format!(" Packages ({}) ", dashboard.packages.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if dashboard.packages.is_empty() {
        let content = Paragraph::new("No packages found.\nPress F5 to refresh.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = dashboard
        .packages
        .iter()
        .enumerate()
        .map(|(idx, package)| {
            let is_selected = idx == dashboard.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let level = package.stock_level();
            let (available, total) = (package.available_quantity, package.total_quantity);

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:<28}", package.name), style),
                Span::styled(
                    format!("{available:>5}/{total:<5}"),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("[{}]", level.label()),
                    Style::default().fg(stock_color(level)),
                ),
            ];
            spans.push(Span::styled(
                format!(" {}", package.package_type),
                Style::default().fg(Color::DarkGray),
            ));
            if !package.is_active {
                spans.push(Span::styled(" inactive", Style::default().fg(Color::DarkGray)));
            }
            if !package.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", package.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, dashboard.selected_index);
}

//! Reusable UI widget helpers

use crate::state::{ApplicationStatus, StockLevel};
use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
///
/// # Example
/// ```ignore
/// let list = List::new(items).block(block);
/// render_scrollable_list(frame, area, list, app.state.dashboard.selected_index);
/// ```
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn status_color(status: ApplicationStatus) -> Color {
    match status {
        ApplicationStatus::Pending => Color::Yellow,
        ApplicationStatus::Approved => Color::Green,
        ApplicationStatus::Rejected => Color::Red,
        ApplicationStatus::PickedUp => Color::Blue,
    }
}

pub fn stock_color(level: StockLevel) -> Color {
    match level {
        StockLevel::OutOfStock => Color::Red,
        StockLevel::LowStock => Color::Yellow,
        StockLevel::InStock => Color::Green,
    }
}

//! UI module for rendering the TUI

mod applications;
mod components;
mod forms;
mod layout;
mod packages;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog, render_restock_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Apply => forms::draw(frame, main_area, app),
        View::Applications => applications::draw(frame, main_area, app),
        View::Packages => packages::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    if app.state.current_view != View::Apply {
        let dashboard = &app.state.dashboard;
        if let Some(confirm) = &dashboard.confirm {
            render_confirm_dialog(frame, confirm, &dashboard.reject_notes);
        } else if let Some(input) = &dashboard.restock_input {
            let name = dashboard
                .selected_package()
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            render_restock_dialog(frame, name, input);
        }
    }

    // Error dialog sits above everything else
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.pending_error_count());
    }
}

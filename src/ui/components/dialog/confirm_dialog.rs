//! Confirmation dialogs for supervisor write operations

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::PendingConfirm;
use ratatui::{style::Color, text::Span, Frame};

/// Render the confirmation for a pending operation; rejections also show the typed notes
pub fn render_confirm_dialog(frame: &mut Frame, confirm: &PendingConfirm, notes: &str) {
    let (title, color) = match confirm {
        PendingConfirm::Approve { .. } => ("Confirm Approval", Color::Green),
        PendingConfirm::Reject { .. } => ("Confirm Rejection", Color::Yellow),
        PendingConfirm::Restock { .. } => ("Confirm Restock", Color::Cyan),
        PendingConfirm::Delete { .. } => ("Confirm Delete", Color::Red),
    };

    let mut message = confirm.prompt();
    if matches!(confirm, PendingConfirm::Reject { .. }) {
        message.push_str(&format!("\n\nNotes: {notes}▌"));
    }

    let hint = vec![
        key_span("Enter"),
        Span::raw(" confirm  "),
        key_span("Esc"),
        Span::raw(" cancel"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: color,
            border_color: color,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}

/// Render the quantity prompt of a restock
pub fn render_restock_dialog(frame: &mut Frame, package_name: &str, input: &str) {
    let message = format!("Units to add to {package_name}:\n\n{input}▌");
    let hint = vec![
        key_span("Enter"),
        Span::raw(" continue  "),
        key_span("Esc"),
        Span::raw(" cancel"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Restock Package",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(hint),
            max_width: 50,
        },
    );
}

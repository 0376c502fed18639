//! Applicant view: the multi-step form and the confirmation that replaces it

mod field_renderer;
mod result_panel;

use super::components::{render_nav_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{
    review_summary, ApplicationForm, ErrorBlock, FormContainer, StepStatus, FIELD_FAMILY_SIZE,
};
use field_renderer::control_lines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the applicant view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    match &app.state.container {
        FormContainer::Form(form) => draw_form(frame, area, form, app.state.scroll_offset),
        FormContainer::Success(block) => result_panel::draw(frame, area, block),
    }
}

fn draw_form(frame: &mut Frame, area: Rect, form: &ApplicationForm, scroll_offset: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Step indicators
            Constraint::Min(0),                // Step content
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(area);

    draw_step_indicators(frame, chunks[0], form);
    draw_step_content(frame, chunks[1], form, scroll_offset);
    draw_navigation(frame, chunks[2], form);
}

fn draw_step_indicators(frame: &mut Frame, area: Rect, form: &ApplicationForm) {
    let mut spans = Vec::new();
    for (i, (status, step)) in form.indicators().iter().zip(&form.steps).enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (symbol, style) = match status {
            StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
            StepStatus::Active => (
                "●",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
        };
        let label = if *status == StepStatus::Active {
            format!("{symbol} {} {}", i + 1, step.title)
        } else {
            format!("{symbol} {}", i + 1)
        };
        spans.push(Span::styled(label, style));
    }

    let indicators = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(
                " Step {} of {} ",
                form.current_step().get(),
                form.total_steps()
            )),
    );
    frame.render_widget(indicators, area);
}

fn error_block_lines(block: &ErrorBlock) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("✗ {}", block.message),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    for item in &block.items {
        lines.push(Line::from(Span::styled(
            format!("  • {item}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines
}

fn summary_lines(form: &ApplicationForm) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in review_summary(form) {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (label, value) in section.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Every line of the active step, top to bottom
fn step_lines(form: &ApplicationForm) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(block) = &form.error_block {
        lines.extend(error_block_lines(block));
    }

    if form.is_last_step() {
        lines.extend(summary_lines(form));
    }

    for (index, control) in form.active_step().controls.iter().enumerate() {
        lines.extend(control_lines(control, index == form.active_control));
        if control.name() == FIELD_FAMILY_SIZE {
            if let Some(recommendation) = &form.recommendation {
                lines.push(Line::from(Span::styled(
                    format!("    ℹ {recommendation}"),
                    Style::default().fg(Color::Blue),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

fn draw_step_content(frame: &mut Frame, area: Rect, form: &ApplicationForm, scroll_offset: usize) {
    let lines = step_lines(form);
    let max_scroll = lines.len().saturating_sub(1);
    let scroll = scroll_offset.min(max_scroll) as u16;

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", form.active_step().title)),
        );
    frame.render_widget(content, area);
}

fn draw_navigation(frame: &mut Frame, area: Rect, form: &ApplicationForm) {
    let controls = form.controls();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Min(0),
            Constraint::Length(26),
        ])
        .split(area);

    if controls.prev_visible {
        render_nav_button(frame, chunks[0], BACK_SHORTCUT, "Previous", false, true);
    }

    if controls.next_visible {
        render_nav_button(
            frame,
            chunks[2],
            NEXT_SHORTCUT,
            "Next",
            controls.next_enabled,
            controls.next_enabled,
        );
    } else if controls.submit_visible {
        let label = if controls.submit_busy {
            "Submitting..."
        } else {
            "Submit"
        };
        render_nav_button(
            frame,
            chunks[2],
            SUBMIT_SHORTCUT,
            label,
            !controls.submit_busy,
            !controls.submit_busy,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::filled_form;
    use chrono::NaiveDate;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_error_block_comes_first() {
        let mut form = ApplicationForm::new(NaiveDate::from_ymd_opt(2024, 8, 30).unwrap());
        form.error_block = Some(ErrorBlock {
            message: "Please correct the errors below.".to_string(),
            items: vec!["phone: Invalid number".to_string()],
        });
        let lines = step_lines(&form);
        let rendered = text(&lines);
        assert!(rendered.starts_with("✗ Please correct the errors below."));
        assert!(rendered.contains("• phone: Invalid number"));
    }

    #[test]
    fn test_recommendation_follows_family_size() {
        let mut form = filled_form(2);
        form.set_value("family_size", "8");
        let rendered = text(&step_lines(&form));
        assert!(rendered.contains("Medium Family Basic or consider multiple packages"));
    }

    #[test]
    fn test_last_step_shows_review() {
        let rendered = text(&step_lines(&filled_form(5)));
        assert!(rendered.contains("Personal Information"));
        assert!(rendered.contains("Pickup Schedule"));
        assert!(rendered.contains("I confirm the information provided is accurate"));
    }
}

//! Line rendering for form controls

use crate::state::{Control, FieldKind, FormField, OptionOrigin, RadioGroup};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CURSOR: &str = "▌";

fn label_line(label: &str, required: bool, is_active: bool, invalid: bool) -> Line<'static> {
    let marker = if is_active { "▸ " } else { "  " };
    let style = if invalid {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![Span::styled(format!("{marker}{label}"), style)];
    if required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn frame_style(is_active: bool, invalid: bool) -> Style {
    if invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Message shown under a field carrying the invalid marker
pub fn invalid_message(field: &FormField) -> String {
    if let Some(message) = &field.custom_validity {
        return message.clone();
    }
    match field.kind {
        FieldKind::Checkbox => "Please check this box if you want to proceed.".to_string(),
        FieldKind::Select => "Please select an item in the list.".to_string(),
        FieldKind::Date if !field.value.trim().is_empty() => match field.min_date {
            Some(min) => format!("Please enter a date on or after {min}."),
            None => "Please enter a valid date (YYYY-MM-DD).".to_string(),
        },
        _ => "Please fill out this field.".to_string(),
    }
}

/// Lines for a single field: label, framed value, then any message
pub fn field_lines(field: &FormField, is_active: bool) -> Vec<Line<'static>> {
    let frame = frame_style(is_active, field.invalid);

    if field.kind == FieldKind::Checkbox {
        let mut lines = vec![Line::from(vec![
            Span::raw(if is_active { "▸ " } else { "  " }),
            Span::styled(field.display_value(), frame),
            Span::raw(" "),
            Span::styled(
                field.label.clone(),
                if field.invalid {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                },
            ),
            Span::styled(
                if field.required { " *" } else { "" },
                Style::default().fg(Color::Red),
            ),
        ])];
        if field.invalid {
            lines.push(message_line(&invalid_message(field)));
        }
        return lines;
    }

    let mut lines = vec![label_line(
        &field.label,
        field.required,
        is_active,
        field.invalid,
    )];

    let value = field.display_value();
    let cursor = if is_active && field.kind.accepts_text() {
        CURSOR
    } else {
        ""
    };

    match field.kind {
        FieldKind::Multiline => {
            let value_lines: Vec<&str> = value.split('\n').collect();
            let last = value_lines.len() - 1;
            for (i, text) in value_lines.into_iter().enumerate() {
                let mut spans = vec![Span::styled("  │ ", frame), Span::raw(text.to_string())];
                if i == last {
                    spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
                }
                lines.push(Line::from(spans));
            }
        }
        FieldKind::Select => {
            let arrows = if is_active { " ◂ ▸" } else { "" };
            lines.push(Line::from(vec![
                Span::styled("  [ ", frame),
                Span::raw(value),
                Span::styled(" ]", frame),
                Span::styled(arrows, Style::default().fg(Color::Cyan)),
            ]));
        }
        _ => {
            let placeholder = if value.is_empty() && !is_active {
                match field.kind {
                    FieldKind::Date => "YYYY-MM-DD",
                    _ => "",
                }
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled("  [ ", frame),
                Span::raw(value),
                Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(" ]", frame),
            ]));
        }
    }

    // live format feedback shows while typing; other messages only after the gate ran
    if field.invalid {
        lines.push(message_line(&invalid_message(field)));
    } else if let Some(message) = &field.custom_validity {
        lines.push(Line::from(Span::styled(
            format!("    {message}"),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

/// Lines for a radio group: label, one line per member with its description
pub fn group_lines(group: &RadioGroup, is_active: bool) -> Vec<Line<'static>> {
    let mut lines = vec![label_line(
        &group.label,
        group.required,
        is_active,
        group.invalid,
    )];

    for (index, option) in group.options.iter().enumerate() {
        let checked = group.selected == Some(index);
        let under_cursor = is_active && group.cursor == index;
        let radio = if checked { "(•)" } else { "( )" };
        let style = if option.invalid {
            Style::default().fg(Color::Red)
        } else if under_cursor {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let pointer = if under_cursor { "  › " } else { "    " };
        lines.push(Line::from(vec![
            Span::styled(pointer, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{radio} {}", option.label), style),
        ]));
        if let Some(description) = &option.description {
            // live catalog entries are told apart from the built-in defaults
            let color = match option.origin {
                OptionOrigin::Catalog => Color::Blue,
                OptionOrigin::Static => Color::DarkGray,
            };
            lines.push(Line::from(Span::styled(
                format!("        {description}"),
                Style::default().fg(color),
            )));
        }
    }

    if group.invalid {
        lines.push(message_line("Please select one of these options."));
    }
    lines
}

pub fn control_lines(control: &Control, is_active: bool) -> Vec<Line<'static>> {
    match control {
        Control::Field(field) => field_lines(field, is_active),
        Control::Group(group) => group_lines(group, is_active),
    }
}

fn message_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("    {message}"),
        Style::default().fg(Color::Red),
    ))
}

//! Form controls: single fields and radio groups

use super::validators::{
    is_valid_email, is_valid_phone, EMAIL_INVALID_MESSAGE, PHONE_INVALID_MESSAGE,
};
use chrono::NaiveDate;

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Phone,
    Email,
    Date,
    Select,
    Checkbox,
}

impl FieldKind {
    /// Fields whose value is typed character by character
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Multiline | Self::Phone | Self::Email | Self::Date
        )
    }
}

/// Where a choice came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOrigin {
    /// Rendered with the form itself
    Static,
    /// Fetched from the package catalog at startup
    Catalog,
}

/// One selectable value of a select field or radio group
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
    pub origin: OptionOrigin,
    /// Invalid marker shown on this member
    pub invalid: bool,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            description: None,
            origin: OptionOrigin::Static,
            invalid: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// A single form field with its configuration and live value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    /// Options for `FieldKind::Select`; the first one is usually a blank placeholder
    pub options: Vec<ChoiceOption>,
    pub required: bool,
    /// Visual invalid marker, set by the step gate
    pub invalid: bool,
    /// Message set by real-time checks; a field with a message never validates
    pub custom_validity: Option<String>,
    /// Lower bound for date fields
    pub min_date: Option<NaiveDate>,
}

impl FormField {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            checked: false,
            options: Vec::new(),
            required: false,
            invalid: false,
            custom_validity: None,
            min_date: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn multiline(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    pub fn phone(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Create a select field; the value starts at the first option
    pub fn select(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        field.options = options;
        field
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set an initial value
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    /// Push a character to a text-like field
    pub fn push_char(&mut self, c: char) {
        if self.kind.accepts_text() {
            self.value.push(c);
        }
    }

    /// Remove the last character from a text-like field
    pub fn pop_char(&mut self) {
        if self.kind.accepts_text() {
            self.value.pop();
        }
    }

    /// Toggle a checkbox
    pub fn toggle(&mut self) {
        if self.kind == FieldKind::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Move a select field to the next (or previous) option, wrapping around
    pub fn cycle_option(&mut self, forward: bool) {
        if self.kind != FieldKind::Select || self.options.is_empty() {
            return;
        }
        let count = self.options.len();
        let current = self
            .options
            .iter()
            .position(|o| o.value == self.value)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else if current == 0 {
            count - 1
        } else {
            current - 1
        };
        self.value = self.options[next].value.clone();
    }

    /// Re-run the format check for phone and email fields.
    ///
    /// An empty value carries no message; emptiness is the required check's concern.
    pub fn refresh_custom_validity(&mut self) {
        self.custom_validity = match self.kind {
            FieldKind::Phone if !self.value.is_empty() && !is_valid_phone(&self.value) => {
                Some(PHONE_INVALID_MESSAGE.to_string())
            }
            FieldKind::Email if !self.value.is_empty() && !is_valid_email(self.value.trim()) => {
                Some(EMAIL_INVALID_MESSAGE.to_string())
            }
            _ => None,
        };
    }

    /// Text shown for the current value
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Checkbox => {
                if self.checked {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Select => self
                .options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}

/// A group of mutually exclusive options validated as one unit
#[derive(Debug, Clone)]
pub struct RadioGroup {
    pub name: String,
    pub label: String,
    pub options: Vec<ChoiceOption>,
    /// Index of the checked member
    pub selected: Option<usize>,
    /// Member under the cursor
    pub cursor: usize,
    pub required: bool,
    /// Invalid marker on the group's wrapper
    pub invalid: bool,
}

impl RadioGroup {
    pub fn new(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            options,
            selected: None,
            cursor: 0,
            required: false,
            invalid: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value of the checked member, if any
    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.value.as_str())
    }

    /// Check the member with the given value; unknown values are ignored
    pub fn select_value(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|o| o.value == value) {
            self.selected = Some(index);
            self.cursor = index;
        }
    }

    pub fn cursor_next(&mut self) {
        if !self.options.is_empty() {
            self.cursor = (self.cursor + 1) % self.options.len();
        }
    }

    pub fn cursor_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.cursor == 0 {
            self.cursor = self.options.len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Check the member under the cursor
    pub fn select_cursor(&mut self) {
        if self.cursor < self.options.len() {
            self.selected = Some(self.cursor);
        }
    }

    /// Valid when at least one member is checked
    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Apply the validity marker to the wrapper and every member
    pub fn mark(&mut self, valid: bool) {
        self.invalid = !valid;
        for option in &mut self.options {
            option.invalid = !valid;
        }
    }

    /// Replace every member with `options`, keeping the selection by value when it survives
    pub fn replace_options(&mut self, options: Vec<ChoiceOption>) {
        let previously_selected = self.selected_value().map(str::to_string);
        self.options = options;
        self.selected = None;
        self.cursor = 0;
        if let Some(value) = previously_selected {
            self.select_value(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_editing() {
        let mut field = FormField::text("first_name", "First Name");
        field.push_char('A');
        field.push_char('d');
        field.push_char('a');
        field.pop_char();
        assert_eq!(field.value, "Ad");
    }

    #[test]
    fn test_checkbox_ignores_text() {
        let mut field = FormField::checkbox("terms_agreement", "I agree");
        field.push_char('x');
        assert!(field.value.is_empty());
        field.toggle();
        assert!(field.checked);
        assert_eq!(field.display_value(), "[x]");
    }

    #[test]
    fn test_select_cycles_and_wraps() {
        let mut field = FormField::select(
            "employment_status",
            "Employment",
            vec![
                ChoiceOption::new("", "Select..."),
                ChoiceOption::new("employed", "Employed"),
                ChoiceOption::new("unemployed", "Unemployed"),
            ],
        );
        assert_eq!(field.value, "");
        field.cycle_option(true);
        assert_eq!(field.value, "employed");
        assert_eq!(field.display_value(), "Employed");
        field.cycle_option(false);
        field.cycle_option(false);
        assert_eq!(field.value, "unemployed");
    }

    #[test]
    fn test_phone_custom_validity() {
        let mut field = FormField::phone("phone", "Phone");
        field.value = "0801".to_string();
        field.refresh_custom_validity();
        assert_eq!(
            field.custom_validity.as_deref(),
            Some(PHONE_INVALID_MESSAGE),
        );

        field.value = "0801 234 5678".to_string();
        field.refresh_custom_validity();
        assert!(field.custom_validity.is_none());

        field.value.clear();
        field.refresh_custom_validity();
        assert!(field.custom_validity.is_none());
    }

    #[test]
    fn test_email_custom_validity() {
        let mut field = FormField::email("email", "Email");
        field.value = "a@b".to_string();
        field.refresh_custom_validity();
        assert!(field.custom_validity.is_some());
        field.value = "a@b.co".to_string();
        field.refresh_custom_validity();
        assert!(field.custom_validity.is_none());
    }

    fn package_group() -> RadioGroup {
        RadioGroup::new(
            "selected_package",
            "Package",
            vec![
                ChoiceOption::new("small_basic", "Small Family Basic"),
                ChoiceOption::new("emergency", "Emergency Relief"),
            ],
        )
        .required()
    }

    #[test]
    fn test_radio_cursor_and_select() {
        let mut group = package_group();
        assert!(!group.has_selection());
        group.cursor_prev();
        assert_eq!(group.cursor, 1);
        group.select_cursor();
        assert_eq!(group.selected_value(), Some("emergency"));
    }

    #[test]
    fn test_radio_mark_applies_to_every_member() {
        let mut group = package_group();
        group.mark(false);
        assert!(group.invalid);
        assert!(group.options.iter().all(|o| o.invalid));
        group.mark(true);
        assert!(!group.invalid);
        assert!(group.options.iter().all(|o| !o.invalid));
    }

    #[test]
    fn test_replace_options_keeps_surviving_selection() {
        let mut group = package_group();
        group.select_value("emergency");

        let mut fetched = ChoiceOption::new("emergency", "Emergency Relief");
        fetched.origin = OptionOrigin::Catalog;
        group.replace_options(vec![ChoiceOption::new("senior", "Senior"), fetched]);
        assert_eq!(group.options.len(), 2);
        assert_eq!(group.selected_value(), Some("emergency"));
        assert_eq!(group.cursor, 1);

        group.replace_options(vec![ChoiceOption::new("senior", "Senior")]);
        assert!(!group.has_selection());
    }
}

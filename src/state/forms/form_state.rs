//! Snapshot of the live form values, rebuilt on every mutating event

use super::application_form::{Control, FormStep};
use super::field::FieldKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Captured value of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Field name to value record; serializes as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldValue>);

impl FormState {
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field, `None` when absent or a flag
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Flag value of a field, `false` when absent
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Flag(true)))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sole owner of the captured [`FormState`]
#[derive(Debug, Clone, Default)]
pub struct FormStateStore {
    state: FormState,
    captures: u64,
}

impl FormStateStore {
    /// Rebuild the whole snapshot from the controls of every step.
    ///
    /// Text-like and select fields are always present, checkboxes are always
    /// present as flags, and a radio group only appears once a member is checked.
    pub fn capture(&mut self, steps: &[FormStep]) {
        let mut state = FormState::default();
        for control in steps.iter().flat_map(|s| s.controls.iter()) {
            match control {
                Control::Field(field) if field.kind == FieldKind::Checkbox => {
                    state.insert(&field.name, FieldValue::Flag(field.checked));
                }
                Control::Field(field) => {
                    state.insert(&field.name, FieldValue::Text(field.value.clone()));
                }
                Control::Group(group) => {
                    if let Some(value) = group.selected_value() {
                        state.insert(&group.name, FieldValue::Text(value.to_string()));
                    }
                }
            }
        }
        self.state = state;
        self.captures += 1;
    }

    /// Read-only view of the last capture
    pub fn snapshot(&self) -> &FormState {
        &self.state
    }

    /// Number of captures taken so far
    pub fn capture_count(&self) -> u64 {
        self.captures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{ChoiceOption, FormField, RadioGroup};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_steps() -> Vec<FormStep> {
        vec![
            FormStep::new(
                "Personal",
                vec![
                    Control::Field(FormField::text("first_name", "First").with_value("Ada")),
                    Control::Field(FormField::email("email", "Email")),
                ],
            ),
            FormStep::new(
                "Package",
                vec![
                    Control::Group(RadioGroup::new(
                        "selected_package",
                        "Package",
                        vec![ChoiceOption::new("small_basic", "Small")],
                    )),
                    Control::Field(FormField::checkbox("package_flexibility", "Flexible")),
                ],
            ),
        ]
    }

    #[test]
    fn test_capture_rules() {
        let mut store = FormStateStore::default();
        store.capture(&sample_steps());

        let state = store.snapshot();
        assert_eq!(state.text("first_name"), Some("Ada"));
        assert_eq!(state.text("email"), Some(""));
        assert_eq!(
            state.get("package_flexibility"),
            Some(&FieldValue::Flag(false)),
        );
        assert!(state.get("selected_package").is_none());
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_capture_replaces_previous_snapshot() {
        let mut store = FormStateStore::default();
        let mut steps = sample_steps();
        store.capture(&steps);

        if let Control::Group(group) = &mut steps[1].controls[0] {
            group.select_value("small_basic");
        }
        if let Control::Field(field) = &mut steps[0].controls[0] {
            field.value = "Bola".to_string();
        }
        store.capture(&steps);

        assert_eq!(store.snapshot().text("first_name"), Some("Bola"));
        assert_eq!(
            store.snapshot().text("selected_package"),
            Some("small_basic"),
        );
        assert_eq!(store.capture_count(), 2);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut store = FormStateStore::default();
        let mut steps = sample_steps();
        if let Control::Field(field) = &mut steps[1].controls[1] {
            field.toggle();
        }
        store.capture(&steps);

        let value = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "",
                "first_name": "Ada",
                "package_flexibility": true,
            })
        );
    }

    #[test]
    fn test_flag_defaults_to_false() {
        let state = FormState::default();
        assert!(!state.flag("delivery_request"));
        assert!(state.is_empty());
    }
}

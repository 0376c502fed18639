//! The multi-step relief application form
//!
//! Owns the five steps and their controls, the [`StepNavigator`] and the
//! [`FormStateStore`]. Every mutating operation re-captures the form state and
//! recomputes whether the active step validates, which drives the enabled state
//! of the "next" control.

use super::field::{ChoiceOption, FieldKind, FormField, RadioGroup};
use super::form_state::{FormState, FormStateStore};
use super::steps::{NavControls, StepIndex, StepNavigator, StepStatus};
use super::validators::{
    is_blank, is_valid_email, is_valid_phone, is_valid_pickup_date, min_pickup_date,
};
use crate::state::result::ErrorBlock;
use chrono::NaiveDate;

/// Number of steps in the application form
pub const TOTAL_STEPS: usize = 5;

pub const FIELD_PHONE: &str = "phone";
pub const FIELD_FAMILY_SIZE: &str = "family_size";
pub const FIELD_SELECTED_PACKAGE: &str = "selected_package";

/// Default package choices shown until the catalog loads
pub fn default_package_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("small_basic", "Small Family Basic")
            .with_description("₦5,000 · Basic relief package for small families (1-3 people)"),
        ChoiceOption::new("medium_basic", "Medium Family Basic")
            .with_description("₦8,000 · Basic relief package for medium families (4-6 people)"),
        ChoiceOption::new("emergency", "Emergency Relief")
            .with_description("₦10,000 · Fast-tracked relief for urgent situations"),
        ChoiceOption::new("senior", "Senior Citizen Special")
            .with_description("Special package for elderly citizens with delivery service"),
    ]
}

/// Pickup time slots
pub fn time_slot_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("morning", "Morning (9:00 AM - 12:00 PM)"),
        ChoiceOption::new("afternoon", "Afternoon (12:00 PM - 3:00 PM)"),
        ChoiceOption::new("evening", "Evening (3:00 PM - 6:00 PM)"),
    ]
}

fn count_options(max: u32, placeholder: Option<&str>) -> Vec<ChoiceOption> {
    let mut options: Vec<ChoiceOption> = placeholder
        .map(|p| vec![ChoiceOption::new("", p)])
        .unwrap_or_default();
    options.extend((if placeholder.is_some() { 1 } else { 0 }..max).map(|n| {
        let value = n.to_string();
        ChoiceOption::new(&value, &value)
    }));
    let last = format!("{max}+");
    options.push(ChoiceOption::new(&last, &last));
    options
}

/// A control inside a step
#[derive(Debug, Clone)]
pub enum Control {
    Field(FormField),
    Group(RadioGroup),
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::Field(f) => &f.name,
            Control::Group(g) => &g.name,
        }
    }

    /// Whether this control currently satisfies its constraints
    pub fn is_valid(&self) -> bool {
        match self {
            Control::Group(group) => !group.required || group.has_selection(),
            Control::Field(field) => field_is_valid(field),
        }
    }

    /// Whether this control currently shows an invalid marker
    pub fn is_marked_invalid(&self) -> bool {
        match self {
            Control::Group(group) => group.invalid,
            Control::Field(field) => field.invalid,
        }
    }

    fn mark(&mut self, valid: bool) {
        match self {
            Control::Group(group) => group.mark(valid),
            Control::Field(field) => field.invalid = !valid,
        }
    }
}

fn field_is_valid(field: &FormField) -> bool {
    if field.kind == FieldKind::Checkbox {
        return !field.required || field.checked;
    }
    if field.custom_validity.is_some() {
        return false;
    }
    if is_blank(&field.value) {
        return !field.required;
    }
    match field.kind {
        FieldKind::Phone => is_valid_phone(&field.value),
        FieldKind::Email => is_valid_email(field.value.trim()),
        FieldKind::Date => is_valid_pickup_date(&field.value, field.min_date),
        _ => true,
    }
}

/// One screen of the form
#[derive(Debug, Clone)]
pub struct FormStep {
    pub title: String,
    pub controls: Vec<Control>,
}

impl FormStep {
    pub fn new(title: &str, controls: Vec<Control>) -> Self {
        Self {
            title: title.to_string(),
            controls,
        }
    }

    /// AND over every control of the step
    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(Control::is_valid)
    }
}

/// The applicant form: steps, navigation, captured state and inline error block
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub steps: Vec<FormStep>,
    navigator: StepNavigator,
    store: FormStateStore,
    /// Focused control within the active step
    pub active_control: usize,
    step_valid: bool,
    busy: bool,
    /// Package recommendation derived from the family size
    pub recommendation: Option<String>,
    /// Error block shown at the top of the form
    pub error_block: Option<ErrorBlock>,
}

impl ApplicationForm {
    /// Build the five-step form; date fields accept nothing before the day after `today`
    pub fn new(today: NaiveDate) -> Self {
        let steps = build_steps(min_pickup_date(today));
        debug_assert_eq!(steps.len(), TOTAL_STEPS);
        let mut form = Self {
            navigator: StepNavigator::new(steps.len()),
            steps,
            store: FormStateStore::default(),
            active_control: 0,
            step_valid: false,
            busy: false,
            recommendation: None,
            error_block: None,
        };
        form.store.capture(&form.steps);
        form.step_valid = form.active_step().is_valid();
        form
    }

    pub fn current_step(&self) -> StepIndex {
        self.navigator.current()
    }

    pub fn total_steps(&self) -> usize {
        self.navigator.total()
    }

    pub fn is_last_step(&self) -> bool {
        self.navigator.is_last()
    }

    pub fn active_step(&self) -> &FormStep {
        &self.steps[self.navigator.current().position()]
    }

    fn active_step_mut(&mut self) -> &mut FormStep {
        let position = self.navigator.current().position();
        &mut self.steps[position]
    }

    /// Indicator status for every step
    pub fn indicators(&self) -> Vec<StepStatus> {
        self.navigator.indicators()
    }

    /// Current navigation controls
    pub fn controls(&self) -> NavControls {
        self.navigator.controls(self.step_valid, self.busy)
    }

    /// Whether the active step validated at the last recomputation
    #[cfg(test)]
    pub fn step_valid(&self) -> bool {
        self.step_valid
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last captured form state
    pub fn snapshot(&self) -> &FormState {
        self.store.snapshot()
    }

    /// Re-capture form state from the live controls
    pub fn capture(&mut self) {
        self.store.capture(&self.steps);
    }

    pub fn capture_count(&self) -> u64 {
        self.store.capture_count()
    }

    /// Find a field anywhere in the form
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.steps
            .iter()
            .flat_map(|s| s.controls.iter())
            .find_map(|c| match c {
                Control::Field(f) if f.name == name => Some(f),
                _ => None,
            })
    }

    #[cfg(test)]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.steps
            .iter_mut()
            .flat_map(|s| s.controls.iter_mut())
            .find_map(|c| match c {
                Control::Field(f) if f.name == name => Some(f),
                _ => None,
            })
    }

    pub fn group(&self, name: &str) -> Option<&RadioGroup> {
        self.steps
            .iter()
            .flat_map(|s| s.controls.iter())
            .find_map(|c| match c {
                Control::Group(g) if g.name == name => Some(g),
                _ => None,
            })
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut RadioGroup> {
        self.steps
            .iter_mut()
            .flat_map(|s| s.controls.iter_mut())
            .find_map(|c| match c {
                Control::Group(g) if g.name == name => Some(g),
                _ => None,
            })
    }

    /// Focused control of the active step
    pub fn active_control(&self) -> Option<&Control> {
        self.active_step().controls.get(self.active_control)
    }

    fn active_control_mut(&mut self) -> Option<&mut Control> {
        let index = self.active_control;
        self.active_step_mut().controls.get_mut(index)
    }

    /// Move focus to the next control of the step, wrapping around
    pub fn focus_next(&mut self) {
        let count = self.active_step().controls.len();
        if count > 0 {
            self.active_control = (self.active_control + 1) % count;
        }
    }

    /// Move focus to the previous control of the step, wrapping around
    pub fn focus_prev(&mut self) {
        let count = self.active_step().controls.len();
        if count == 0 {
            return;
        }
        if self.active_control == 0 {
            self.active_control = count - 1;
        } else {
            self.active_control -= 1;
        }
    }

    /// Type a character into the focused field
    pub fn input_char(&mut self, c: char) {
        if let Some(Control::Field(field)) = self.active_control_mut() {
            if field.kind.accepts_text() {
                field.push_char(c);
                self.on_change();
            }
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if let Some(Control::Field(field)) = self.active_control_mut() {
            if field.kind.accepts_text() {
                field.pop_char();
                self.on_change();
            }
        }
    }

    /// Insert a newline into a multiline field
    pub fn newline(&mut self) {
        if let Some(Control::Field(field)) = self.active_control_mut() {
            if field.is_multiline() {
                field.value.push('\n');
                self.on_change();
            }
        }
    }

    /// Toggle the focused checkbox or check the radio member under the cursor
    pub fn activate(&mut self) {
        let changed = match self.active_control_mut() {
            Some(Control::Field(field)) if field.kind == FieldKind::Checkbox => {
                field.toggle();
                true
            }
            Some(Control::Group(group)) => {
                group.select_cursor();
                true
            }
            _ => false,
        };
        if changed {
            self.on_change();
        }
    }

    /// Cycle a select field or move a radio group's cursor
    pub fn cycle(&mut self, forward: bool) {
        let changed = match self.active_control_mut() {
            Some(Control::Field(field)) if field.kind == FieldKind::Select => {
                field.cycle_option(forward);
                true
            }
            Some(Control::Group(group)) => {
                if forward {
                    group.cursor_next();
                } else {
                    group.cursor_prev();
                }
                false
            }
            _ => false,
        };
        if changed {
            self.on_change();
        }
    }

    /// Set a field's value directly, as if typed
    #[cfg(test)]
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            field.value = value.to_string();
            self.on_change();
        }
    }

    /// Set a checkbox directly
    #[cfg(test)]
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        if let Some(field) = self.field_mut(name) {
            field.checked = checked;
            self.on_change();
        }
    }

    /// Check a radio member by value directly
    #[cfg(test)]
    pub fn select_option(&mut self, group: &str, value: &str) {
        if let Some(group) = self.group_mut(group) {
            group.select_value(value);
            self.on_change();
        }
    }

    /// Re-run the change pipeline after options were replaced outside an input event
    pub fn refresh(&mut self) {
        self.on_change();
    }

    /// Shared tail of every input/change event
    fn on_change(&mut self) {
        for field in self.steps.iter_mut().flat_map(|s| s.controls.iter_mut()) {
            if let Control::Field(field) = field {
                if matches!(field.kind, FieldKind::Phone | FieldKind::Email) {
                    field.refresh_custom_validity();
                }
            }
        }
        self.recommendation = self
            .field(FIELD_FAMILY_SIZE)
            .filter(|f| !f.value.is_empty())
            .map(|f| package_recommendation(&f.value));

        // clear stale markers once a control is fixed
        for control in self.active_step_mut().controls.iter_mut() {
            if control.is_marked_invalid() && control.is_valid() {
                control.mark(true);
            }
        }

        self.capture();
        self.step_valid = self.active_step().is_valid();
    }

    /// Validate the active step and apply invalid markers to every failing control.
    ///
    /// Radio groups are validated once per group and marked as a whole.
    pub fn validate_active_step(&mut self) -> bool {
        let mut valid = true;
        for control in self.active_step_mut().controls.iter_mut() {
            let control_valid = control.is_valid();
            control.mark(control_valid);
            valid &= control_valid;
        }
        self.step_valid = valid;
        valid
    }

    /// Move to the next step when the active one validates.
    /// Returns whether the step changed.
    pub fn advance(&mut self) -> bool {
        let valid = self.validate_active_step();
        if !self.navigator.advance(valid) {
            return false;
        }
        self.active_control = 0;
        self.capture();
        self.step_valid = self.active_step().is_valid();
        true
    }

    /// Move back one step without validating
    pub fn retreat(&mut self) -> bool {
        if !self.navigator.retreat() {
            return false;
        }
        self.active_control = 0;
        self.step_valid = self.active_step().is_valid();
        true
    }

    /// Enter the submitting state; `false` when a submission is already in flight
    pub fn begin_submit(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Leave the submitting state
    pub fn finish_submit(&mut self) {
        self.busy = false;
    }

    /// Display name of a package value, using the live option labels
    pub fn package_name(&self, value: &str) -> String {
        self.group(FIELD_SELECTED_PACKAGE)
            .and_then(|g| g.options.iter().find(|o| o.value == value))
            .map(|o| o.label.clone())
            .or_else(|| {
                default_package_options()
                    .into_iter()
                    .find(|o| o.value == value)
                    .map(|o| o.label)
            })
            .unwrap_or_else(|| value.to_string())
    }
}

/// Recommendation text for a family size value such as "4" or "10+"
pub fn package_recommendation(family_size: &str) -> String {
    let digits: String = family_size
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let size = digits.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1);
    let package = if size <= 3 {
        "Small Family Basic package"
    } else if size <= 6 {
        "Medium Family Basic package"
    } else {
        "Medium Family Basic or consider multiple packages"
    };
    format!("Based on your family size, we recommend the {package}.")
}

/// Display name of a time slot value
pub fn time_slot_name(value: &str) -> String {
    time_slot_options()
        .into_iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or_else(|| value.to_string())
}

fn build_steps(min_date: NaiveDate) -> Vec<FormStep> {
    let mut preferred_date =
        FormField::date("preferred_date", "Preferred Date (YYYY-MM-DD)").required();
    preferred_date.min_date = Some(min_date);
    let mut alternative_date = FormField::date("alternative_date", "Alternative Date (optional)");
    alternative_date.min_date = Some(min_date);

    let mut alternative_time_options = vec![ChoiceOption::new("", "No preference")];
    alternative_time_options.extend(time_slot_options());

    vec![
        FormStep::new(
            "Personal Information",
            vec![
                Control::Field(FormField::text("first_name", "First Name").required()),
                Control::Field(FormField::text("last_name", "Last Name").required()),
                Control::Field(FormField::phone(FIELD_PHONE, "Phone Number").required()),
                Control::Field(FormField::email("email", "Email (optional)")),
                Control::Field(FormField::multiline("address", "Address").required()),
            ],
        ),
        FormStep::new(
            "Family Details",
            vec![
                Control::Field(
                    FormField::select(
                        FIELD_FAMILY_SIZE,
                        "Family Size",
                        count_options(10, Some("Select family size")),
                    )
                    .required(),
                ),
                Control::Field(
                    FormField::select("children_count", "Children", count_options(6, None))
                        .with_value("0"),
                ),
                Control::Field(
                    FormField::select("elderly_count", "Elderly Members", count_options(4, None))
                        .with_value("0"),
                ),
                Control::Field(
                    FormField::select(
                        "employment_status",
                        "Employment Status",
                        vec![
                            ChoiceOption::new("", "Select status"),
                            ChoiceOption::new("employed", "Employed"),
                            ChoiceOption::new("self_employed", "Self-employed"),
                            ChoiceOption::new("unemployed", "Unemployed"),
                            ChoiceOption::new("retired", "Retired"),
                            ChoiceOption::new("student", "Student"),
                            ChoiceOption::new("other", "Other"),
                        ],
                    )
                    .required(),
                ),
                Control::Field(FormField::multiline("special_needs", "Special Needs (optional)")),
                Control::Group(
                    RadioGroup::new(
                        "tec_member",
                        "Member of The Elevation Church (TEC), Ibadan?",
                        vec![ChoiceOption::new("yes", "Yes"), ChoiceOption::new("no", "No")],
                    )
                    .required(),
                ),
            ],
        ),
        FormStep::new(
            "Package Selection",
            vec![
                Control::Group(
                    RadioGroup::new(
                        FIELD_SELECTED_PACKAGE,
                        "Relief Package",
                        default_package_options(),
                    )
                    .required(),
                ),
                Control::Field(FormField::checkbox(
                    "package_flexibility",
                    "I accept an alternative package if mine is unavailable",
                )),
            ],
        ),
        FormStep::new(
            "Pickup Schedule",
            vec![
                Control::Field(preferred_date),
                Control::Group(
                    RadioGroup::new("preferred_time", "Preferred Time", time_slot_options())
                        .required(),
                ),
                Control::Field(alternative_date),
                Control::Field(FormField::select(
                    "alternative_time",
                    "Alternative Time",
                    alternative_time_options,
                )),
                Control::Field(FormField::checkbox(
                    "transportation_help",
                    "I need help with transportation",
                )),
                Control::Field(FormField::checkbox(
                    "delivery_request",
                    "Request home delivery",
                )),
            ],
        ),
        FormStep::new(
            "Review & Confirm",
            vec![Control::Field(
                FormField::checkbox(
                    "terms_agreement",
                    "I confirm the information provided is accurate",
                )
                .required(),
            )],
        ),
    ]
}

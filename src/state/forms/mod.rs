//! Form domain layer
//!
//! Controls, validation predicates, step navigation and the captured form state
//! behind the applicant view.

mod application_form;
mod field;
mod form_state;
mod steps;
mod summary;
mod validators;

pub use application_form::{
    time_slot_name, ApplicationForm, Control, FIELD_FAMILY_SIZE, FIELD_SELECTED_PACKAGE,
};
#[cfg(test)]
pub(crate) use application_form::{default_package_options, tests::filled_form};
pub use field::{ChoiceOption, FieldKind, FormField, OptionOrigin, RadioGroup};
pub use form_state::FormState;
pub use steps::StepStatus;
pub use summary::review_summary;
#[cfg(test)]
pub(crate) use validators::PHONE_INVALID_MESSAGE;

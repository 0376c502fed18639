//! Submission outcomes and the blocks rendered from them

use super::forms::ApplicationForm;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Message shown when the request never produced a usable response
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Message shown when a rejection carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Please correct the errors below and try again.";

/// Note shown under a successful submission
pub const FOLLOW_UP_NOTE: &str = "You will receive an SMS/email once your application is \
reviewed. Approved applicants get a QR code to present at pickup.";

/// Field name to ordered messages, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    /// One `field: message` line per message
    pub fn lines(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field}: {message}"))
            })
            .collect()
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let Some(Value::Object(map)) = value else {
            return Ok(Self::default());
        };
        let entries = map
            .into_iter()
            .map(|(field, messages)| {
                let messages = match messages {
                    Value::Array(items) => items.iter().map(message_text).collect(),
                    other => vec![message_text(&other)],
                };
                (field, messages)
            })
            .collect();
        Ok(Self(entries))
    }
}

/// Key submitted fields echoed back by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmittedEcho {
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub selected_package: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parsed submission response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub data: Option<SubmittedEcho>,
    #[serde(default)]
    pub errors: FieldErrors,
}

impl SubmissionResult {
    /// Generic failure for transport errors and unreadable bodies
    pub fn network_failure() -> Self {
        Self {
            success: false,
            message: NETWORK_ERROR_MESSAGE.to_string(),
            ..Default::default()
        }
    }

    /// Reference number from the top level, falling back to the echoed data
    pub fn reference(&self) -> Option<&str> {
        self.reference_number
            .as_deref()
            .or_else(|| self.data.as_ref()?.reference_number.as_deref())
            .filter(|r| !r.is_empty())
    }
}

/// Error list shown at the top of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBlock {
    pub message: String,
    pub items: Vec<String>,
}

impl ErrorBlock {
    pub fn from_result(result: &SubmissionResult) -> Self {
        let message = if result.message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            result.message.clone()
        };
        Self {
            message,
            items: result.errors.lines(),
        }
    }
}

/// Confirmation that replaces the form after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessBlock {
    pub message: String,
    pub reference_number: String,
    pub full_name: Option<String>,
    pub status: Option<String>,
    pub package_name: Option<String>,
    pub phone: Option<String>,
    pub note: &'static str,
}

impl SuccessBlock {
    /// Build the block; package values are resolved to display names through the form
    pub fn from_result(result: &SubmissionResult, form: &ApplicationForm) -> Self {
        let echo = result.data.clone().unwrap_or_default();
        Self {
            message: result.message.clone(),
            reference_number: result.reference().unwrap_or_default().to_string(),
            full_name: echo.full_name,
            status: echo.status,
            package_name: echo.selected_package.map(|p| form.package_name(&p)),
            phone: echo.phone,
            note: FOLLOW_UP_NOTE,
        }
    }

    /// Every line of text shown in the block
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.message.clone(),
            format!("Reference Number: {}", self.reference_number),
        ];
        if let Some(name) = &self.full_name {
            lines.push(format!("Name: {name}"));
        }
        if let Some(status) = &self.status {
            lines.push(format!("Status: {status}"));
        }
        if let Some(package) = &self.package_name {
            lines.push(format!("Package: {package}"));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("Phone: {phone}"));
        }
        lines.push(self.note.to_string());
        lines
    }
}

/// Content of the applicant view: the live form, or the confirmation that replaced it
#[derive(Debug, Clone)]
pub enum FormContainer {
    Form(Box<ApplicationForm>),
    Success(SuccessBlock),
}

impl FormContainer {
    pub fn new(form: ApplicationForm) -> Self {
        Self::Form(Box::new(form))
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&ApplicationForm> {
        match self {
            Self::Form(form) => Some(&**form),
            Self::Success(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ApplicationForm> {
        match self {
            Self::Form(form) => Some(&mut **form),
            Self::Success(_) => None,
        }
    }

    /// Render an outcome: success replaces the whole container, anything else
    /// swaps the form's error block and leaves the form in place.
    ///
    /// Returns whether the container was replaced.
    pub fn present(&mut self, result: &SubmissionResult, http_ok: bool) -> bool {
        let Self::Form(form) = self else {
            return false;
        };
        if http_ok && result.success {
            let block = SuccessBlock::from_result(result, form);
            *self = Self::Success(block);
            true
        } else {
            form.error_block = Some(ErrorBlock::from_result(result));
            false
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn application_form_for_tests() -> ApplicationForm {
        ApplicationForm::new(NaiveDate::from_ymd_opt(2024, 8, 30).unwrap())
    }

    fn parse(body: &str) -> SubmissionResult {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_field_errors_keep_server_order() {
        let result = parse(
            r#"{"success": false, "message": "Please correct the errors below.",
                "errors": {"phone": ["Enter a valid Nigerian phone number."],
                           "address": ["This field is required.", "Too short."],
                           "family_size": "Required"}}"#,
        );
        assert_eq!(
            result.errors.lines(),
            vec![
                "phone: Enter a valid Nigerian phone number.",
                "address: This field is required.",
                "address: Too short.",
                "family_size: Required",
            ]
        );
    }

    #[test]
    fn test_non_string_messages_are_stringified() {
        let result = parse(r#"{"errors": {"count": [3], "nested": {"a": 1}}}"#);
        assert_eq!(
            result.errors.lines(),
            vec!["count: 3", r#"nested: {"a":1}"#],
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let result = parse(r#"{"errors": null}"#);
        assert!(!result.success);
        assert!(result.errors.lines().is_empty());
        let block = ErrorBlock::from_result(&result);
        assert_eq!(block.message, FALLBACK_ERROR_MESSAGE);
        assert!(block.items.is_empty());
    }

    #[test]
    fn test_network_failure() {
        let block = ErrorBlock::from_result(&SubmissionResult::network_failure());
        assert_eq!(block.message, NETWORK_ERROR_MESSAGE);
        assert!(block.items.is_empty());
    }

    #[test]
    fn test_success_replaces_container() {
        let mut container = FormContainer::new(application_form_for_tests());
        let result = parse(
            r#"{"success": true, "message": "Application submitted successfully!",
                "reference_number": "REF123",
                "data": {"id": "3f2b9c4e-8a41-4c55-9d0e-0a3c2b7f6e11", "reference_number": "REF123",
                         "full_name": "Ada Obi", "phone": "08012345678",
                         "selected_package": "emergency", "status": "PENDING"}}"#,
        );
        assert!(container.present(&result, true));

        let FormContainer::Success(block) = &container else {
            panic!("expected success block");
        };
        assert_eq!(block.reference_number, "REF123");
        assert_eq!(block.package_name.as_deref(), Some("Emergency Relief"));
        assert!(block.lines().iter().any(|l| l.contains("REF123")));
        assert!(container.form().is_none());
    }

    #[test]
    fn test_success_flag_with_bad_status_is_an_error() {
        let mut container = FormContainer::new(application_form_for_tests());
        let result = parse(r#"{"success": true, "message": "odd", "reference_number": "R"}"#);
        assert!(!container.present(&result, false));
        assert_eq!(
            container.form().unwrap().error_block.as_ref().unwrap().message,
            "odd"
        );
    }

    #[test]
    fn test_error_replaces_previous_block() {
        let mut container = FormContainer::new(application_form_for_tests());
        container.present(
            &parse(r#"{"success": false, "errors": {"phone": ["Invalid number"]}}"#),
            false,
        );
        container.present(
            &parse(r#"{"success": false, "message": "Try later"}"#),
            false,
        );
        let block = container.form().unwrap().error_block.clone().unwrap();
        assert_eq!(block.message, "Try later");
        assert!(block.items.is_empty());
    }

    #[test]
    fn test_present_after_success_is_ignored() {
        let mut container = FormContainer::Success(SuccessBlock {
            message: String::new(),
            reference_number: "REF1".to_string(),
            full_name: None,
            status: None,
            package_name: None,
            phone: None,
            note: FOLLOW_UP_NOTE,
        });
        assert!(!container.present(&SubmissionResult::network_failure(), false));
        assert!(container.is_success());
    }
}

//! Read-only review of the captured form shown on the final step

use super::application_form::{time_slot_name, ApplicationForm};

/// A titled block of label/value rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

impl SummarySection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: &'static str, value: String) -> Self {
        self.rows.push((label, value));
        self
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Build the review sections from the last captured snapshot
pub fn review_summary(form: &ApplicationForm) -> Vec<SummarySection> {
    let state = form.snapshot();
    let text = |name: &str| state.text(name).unwrap_or_default().to_string();

    let email = match state.text("email").map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => "Not provided".to_string(),
    };
    let children = match state.text("children_count") {
        Some(count) if !count.is_empty() => count.to_string(),
        _ => "0".to_string(),
    };

    let mut pickup = SummarySection::new("Pickup Schedule")
        .row("Preferred Date", text("preferred_date"))
        .row("Preferred Time", time_slot_name(&text("preferred_time")));
    if state.flag("transportation_help") {
        pickup = pickup.row("Transportation Help", "Requested".to_string());
    }
    if state.flag("delivery_request") {
        pickup = pickup.row("Delivery", "Requested".to_string());
    }

    vec![
        SummarySection::new("Personal Information")
            .row(
                "Name",
                format!("{} {}", text("first_name"), text("last_name"))
                    .trim()
                    .to_string(),
            )
            .row("Phone", text("phone"))
            .row("Email", email),
        SummarySection::new("Family Details")
            .row("Family Size", format!("{} people", text("family_size")))
            .row("Children", children)
            .row("Employment", text("employment_status")),
        SummarySection::new("Package Selection")
            .row(
                "Selected Package",
                form.package_name(&text("selected_package")),
            )
            .row("Flexible", yes_no(state.flag("package_flexibility"))),
        pickup,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::application_form::tests::filled_form;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_reflects_capture() {
        let mut form = filled_form(5);
        form.set_checked("delivery_request", true);
        let sections = review_summary(&form);

        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].rows[0], ("Name", "Ada Obi".to_string()));
        assert_eq!(sections[0].rows[2], ("Email", "Not provided".to_string()));
        assert_eq!(sections[1].rows[0], ("Family Size", "4 people".to_string()));
        assert_eq!(
            sections[2].rows[0],
            ("Selected Package", "Medium Family Basic".to_string())
        );
        assert_eq!(sections[2].rows[1], ("Flexible", "No".to_string()));
        assert_eq!(
            sections[3].rows[1],
            ("Preferred Time", "Morning (9:00 AM - 12:00 PM)".to_string())
        );
        assert_eq!(sections[3].rows.len(), 3);
        assert_eq!(sections[3].rows[2], ("Delivery", "Requested".to_string()));
    }
}

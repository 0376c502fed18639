//! Package catalog fetched at startup to populate the package choices

use super::forms::{ApplicationForm, ChoiceOption, OptionOrigin, FIELD_SELECTED_PACKAGE};
use serde::{Deserialize, Deserializer};

/// One package as listed by the public catalog endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogOption {
    pub package_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub cash_amount: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Decimal fields arrive either as JSON numbers or as strings like `"5000.00"`
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Format an amount as whole naira with thousands separators, e.g. `₦10,000`
pub fn format_naira(amount: f64) -> String {
    let whole = amount.round().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && whole > 0 { "-" } else { "" };
    format!("{sign}₦{grouped}")
}

impl CatalogOption {
    /// Choice shown in the package radio group
    pub fn to_choice(&self) -> ChoiceOption {
        let amount = format_naira(self.cash_amount);
        let description = if self.description.is_empty() {
            amount
        } else {
            format!("{amount} · {}", self.description)
        };
        let mut option =
            ChoiceOption::new(&self.package_type, &self.name).with_description(&description);
        option.origin = OptionOrigin::Catalog;
        option
    }
}

/// Replace the package choices with the available catalog entries.
///
/// Returns the number of options now shown from the catalog. An empty catalog, or one
/// with nothing available, leaves the default choices untouched.
pub fn apply_catalog(form: &mut ApplicationForm, catalog: &[CatalogOption]) -> usize {
    let options: Vec<ChoiceOption> = catalog
        .iter()
        .filter(|p| p.is_available)
        .map(CatalogOption::to_choice)
        .collect();
    if options.is_empty() {
        return 0;
    }
    let count = options.len();
    match form.group_mut(FIELD_SELECTED_PACKAGE) {
        Some(group) => group.replace_options(options),
        None => return 0,
    }
    form.refresh();
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{default_package_options, filled_form};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn form() -> ApplicationForm {
        ApplicationForm::new(NaiveDate::from_ymd_opt(2024, 8, 30).unwrap())
    }

    fn catalog() -> Vec<CatalogOption> {
        serde_json::from_str(
            r#"[
                {"package_type": "emergency", "name": "Emergency Relief",
                 "description": "Fast-tracked relief", "cash_amount": "10000.00", "is_available": true},
                {"package_type": "senior", "name": "Senior Citizen Special",
                 "description": "", "cash_amount": 12500, "is_available": true},
                {"package_type": "small_basic", "name": "Small Family Basic",
                 "description": "Basic", "cash_amount": "5000.00", "is_available": false}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cash_amount_accepts_string_and_number() {
        let catalog = catalog();
        assert_eq!(catalog[0].cash_amount, 10000.0);
        assert_eq!(catalog[1].cash_amount, 12500.0);
    }

    #[test]
    fn test_invalid_amount_fails_decode() {
        let result: Result<CatalogOption, _> = serde_json::from_str(
            r#"{"package_type": "x", "name": "X", "cash_amount": "lots"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_format_naira() {
        assert_eq!(format_naira(0.0), "₦0");
        assert_eq!(format_naira(999.0), "₦999");
        assert_eq!(format_naira(5000.0), "₦5,000");
        assert_eq!(format_naira(1234567.4), "₦1,234,567");
    }

    #[test]
    fn test_apply_replaces_defaults_with_available_entries() {
        let mut form = form();
        let shown = apply_catalog(&mut form, &catalog());
        assert_eq!(shown, 2);

        let group = form.group(FIELD_SELECTED_PACKAGE).unwrap();
        let values: Vec<_> = group.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["emergency", "senior"]);
        assert!(group.options.iter().all(|o| o.origin == OptionOrigin::Catalog));
        assert_eq!(
            group.options[0].description.as_deref(),
            Some("₦10,000 · Fast-tracked relief")
        );
        assert_eq!(group.options[1].description.as_deref(), Some("₦12,500"));
    }

    #[test]
    fn test_empty_catalog_leaves_defaults() {
        let mut form = form();
        assert_eq!(apply_catalog(&mut form, &[]), 0);
        let group = form.group(FIELD_SELECTED_PACKAGE).unwrap();
        assert_eq!(group.options, default_package_options());
    }

    #[test]
    fn test_selection_survives_reload() {
        let mut form = form();
        form.select_option(FIELD_SELECTED_PACKAGE, "senior");
        apply_catalog(&mut form, &catalog());
        assert_eq!(form.snapshot().text(FIELD_SELECTED_PACKAGE), Some("senior"));
    }

    #[test]
    fn test_dropped_selection_disables_next() {
        let mut form = filled_form(3);
        form.select_option(FIELD_SELECTED_PACKAGE, "small_basic");
        assert!(form.controls().next_enabled);

        apply_catalog(&mut form, &catalog()[..1]);

        assert!(!form.group(FIELD_SELECTED_PACKAGE).unwrap().has_selection());
        assert!(!form.step_valid());
        assert!(!form.controls().next_enabled);
        assert_eq!(form.snapshot().text(FIELD_SELECTED_PACKAGE), None);
    }
}

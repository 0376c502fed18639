//! Application state definitions

use super::dashboard::Dashboard;
use super::forms::ApplicationForm;
use super::result::FormContainer;
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The applicant form
    #[default]
    Apply,
    /// Supervisor review of submitted applications
    Applications,
    /// Supervisor package inventory
    Packages,
}

impl View {
    pub fn next(&self) -> Self {
        match self {
            Self::Apply => Self::Applications,
            Self::Applications => Self::Packages,
            Self::Packages => Self::Apply,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Apply => "Apply",
            Self::Applications => "Applications",
            Self::Packages => "Packages",
        }
    }

    pub fn all() -> [View; 3] {
        [Self::Apply, Self::Applications, Self::Packages]
    }
}

/// Main application state
pub struct AppState {
    pub current_view: View,

    /// The applicant form, or the confirmation that replaced it
    pub container: FormContainer,

    /// Supervisor views
    pub dashboard: Dashboard,
    pub dashboard_loaded: bool,

    /// Whether the package catalog has been applied to the form
    pub catalog_loaded: bool,

    // UI state
    pub scroll_offset: usize,
    errors: VecDeque<String>,
}

impl AppState {
    /// Fresh state with a new form whose pickup dates start the day after `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_view: View::default(),
            container: FormContainer::new(ApplicationForm::new(today)),
            dashboard: Dashboard::default(),
            dashboard_loaded: false,
            catalog_loaded: false,
            scroll_offset: 0,
            errors: VecDeque::new(),
        }
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&ApplicationForm> {
        self.container.form()
    }

    pub fn form_mut(&mut self) -> Option<&mut ApplicationForm> {
        self.container.form_mut()
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn pending_error_count(&self) -> usize {
        self.errors.len()
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll to the top of the view
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2024, 8, 30).unwrap())
    }

    #[test]
    fn test_starts_on_apply_view() {
        let state = state();
        assert_eq!(state.current_view, View::Apply);
        assert!(state.form().is_some());
        assert!(!state.catalog_loaded);
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Apply.next(), View::Applications);
        assert_eq!(View::Packages.next(), View::Apply);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = state();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        assert_eq!(state.pending_error_count(), 2);
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_scroll() {
        let mut state = state();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        state.scroll_down();
        state.scroll_down();
        assert_eq!(state.scroll_offset, 2);
        state.scroll_to_top();
        assert_eq!(state.scroll_offset, 0);
    }
}

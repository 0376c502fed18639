//! Application state and core logic

use crate::api::{ApiClientTrait, SubmitOutcome};
use crate::platform::COPY_MODIFIER;
use crate::state::{
    apply_catalog, AppState, ApplicationStatus, CatalogOption, Control, FormContainer,
    PendingConfirm, SubmissionResult, View,
};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Shared collaborators handed to the application once at startup
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn ApiClientTrait>,
}

/// Everything a key press can ask the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchView,
    // form
    NextStep,
    PrevStep,
    Submit,
    FocusNext,
    FocusPrev,
    Input(char),
    Backspace,
    Enter,
    CycleNext,
    CyclePrev,
    CopyReference,
    ScrollUp,
    ScrollDown,
    // dashboard
    SelectUp,
    SelectDown,
    Refresh,
    CycleFilter,
    ToggleSort,
    Approve,
    Reject,
    Restock,
    Delete,
    Confirm,
    Cancel,
}

type Pending<T> = Option<oneshot::Receiver<Result<T>>>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    context: AppContext,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    catalog_rx: Pending<Vec<CatalogOption>>,
    submit_rx: Pending<SubmitOutcome>,
}

impl App {
    /// Create a new App instance; pickup dates start the day after `today`
    pub fn new(context: AppContext, today: NaiveDate) -> Self {
        Self {
            state: AppState::new(today),
            context,
            quit: false,
            status_message: None,
            catalog_rx: None,
            submit_rx: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Whether a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.submit_rx.is_some()
    }

    /// Fetch the package catalog in the background.
    ///
    /// The result is applied by [`App::poll_background`].
    pub fn start_catalog_load(&mut self) {
        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.context.api);
        tokio::spawn(async move {
            let _ = tx.send(api.available_packages().await);
        });
        self.catalog_rx = Some(rx);
    }

    /// Pick up finished background work without blocking
    pub fn poll_background(&mut self) {
        if let Some(rx) = self.catalog_rx.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    self.catalog_rx = None;
                    self.apply_catalog_result(result);
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.catalog_rx = None;
                    tracing::warn!("Package catalog task ended without a result");
                }
            }
        }

        if let Some(rx) = self.submit_rx.as_mut() {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.submit_rx = None;
                    self.finish_submission(outcome);
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.submit_rx = None;
                    self.finish_submission(Err(anyhow::anyhow!("submission task dropped")));
                }
            }
        }
    }

    /// Load the catalog and apply it immediately
    #[cfg(test)]
    pub async fn load_catalog(&mut self) {
        let result = self.context.api.available_packages().await;
        self.apply_catalog_result(result);
    }

    fn apply_catalog_result(&mut self, result: Result<Vec<CatalogOption>>) {
        let catalog = match result {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Failed to load package catalog, keeping defaults: {e:#}");
                return;
            }
        };
        let Some(form) = self.state.form_mut() else {
            return;
        };
        let shown = apply_catalog(form, &catalog);
        if shown > 0 {
            self.state.catalog_loaded = true;
            tracing::info!("Loaded {shown} packages from the catalog");
        } else {
            tracing::debug!("Package catalog empty, keeping defaults");
        }
    }

    /// Validate the final step and send the form in the background.
    ///
    /// Returns whether a request was started. Nothing is sent while another
    /// submission is in flight or when the step does not validate.
    pub fn start_submission(&mut self) -> bool {
        let Some(form) = self.state.form_mut() else {
            return false;
        };
        if !form.is_last_step() || form.is_busy() {
            return false;
        }
        if !form.validate_active_step() {
            return false;
        }
        if !form.begin_submit() {
            return false;
        }
        form.capture();
        let snapshot = form.snapshot().clone();
        tracing::debug!(
            "Submitting application after {} captures",
            form.capture_count()
        );

        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.context.api);
        tokio::spawn(async move {
            let _ = tx.send(api.submit_application(&snapshot).await);
        });
        self.submit_rx = Some(rx);
        true
    }

    /// Wait for the in-flight submission, if any, and present it
    #[cfg(test)]
    pub async fn wait_for_submission(&mut self) {
        if let Some(rx) = self.submit_rx.take() {
            let outcome = rx
                .await
                .unwrap_or_else(|_| Err(anyhow::anyhow!("submission task dropped")));
            self.finish_submission(outcome);
        }
    }

    fn finish_submission(&mut self, outcome: Result<SubmitOutcome>) {
        if let Some(form) = self.state.form_mut() {
            form.finish_submit();
        }

        let (result, http_ok) = match outcome {
            Ok(SubmitOutcome { http_ok, result }) => (result, http_ok),
            Err(e) => {
                tracing::error!("Application submission failed: {e:#}");
                (SubmissionResult::network_failure(), false)
            }
        };

        if self.state.container.present(&result, http_ok) {
            tracing::info!(
                "Application submitted, reference {}",
                result.reference().unwrap_or("-")
            );
        } else {
            tracing::info!("Application rejected: {}", result.message);
        }
        self.state.scroll_to_top();
    }

    /// Map a key press to an action for the current view and modal state
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
            return Some(Action::Quit);
        }
        if self.state.has_errors() {
            return matches!(key.code, KeyCode::Enter | KeyCode::Esc).then_some(Action::Confirm);
        }
        if ctrl && key.code == KeyCode::Char('t') {
            return Some(Action::SwitchView);
        }

        match self.state.current_view {
            View::Apply => Self::apply_action(key, ctrl),
            View::Applications | View::Packages => self.dashboard_action(key),
        }
    }

    fn apply_action(key: KeyEvent, ctrl: bool) -> Option<Action> {
        if key.modifiers.contains(COPY_MODIFIER) && key.code == KeyCode::Char('y') {
            return Some(Action::CopyReference);
        }
        if ctrl {
            return match key.code {
                KeyCode::Char('n') => Some(Action::NextStep),
                KeyCode::Char('b') => Some(Action::PrevStep),
                KeyCode::Char('s') => Some(Action::Submit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
            KeyCode::Right => Some(Action::CycleNext),
            KeyCode::Left => Some(Action::CyclePrev),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::PageDown => Some(Action::ScrollDown),
            KeyCode::PageUp => Some(Action::ScrollUp),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        }
    }

    fn dashboard_action(&self, key: KeyEvent) -> Option<Action> {
        let dashboard = &self.state.dashboard;

        if dashboard.confirm.is_some() {
            return match key.code {
                KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Input(c)),
                _ => None,
            };
        }
        if dashboard.restock_input.is_some() {
            return match key.code {
                KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Input(c)),
                _ => None,
            };
        }

        let packages = self.state.current_view == View::Packages;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectDown),
            KeyCode::F(5) | KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('f') if !packages => Some(Action::CycleFilter),
            KeyCode::Char('s') if !packages => Some(Action::ToggleSort),
            KeyCode::Char('a') if !packages => Some(Action::Approve),
            KeyCode::Char('x') if !packages => Some(Action::Reject),
            KeyCode::Char('r') if packages => Some(Action::Restock),
            KeyCode::Char('d') if packages => Some(Action::Delete),
            _ => None,
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(action) = self.action_for(key) {
            self.dispatch(action).await?;
        }
        Ok(())
    }

    /// Apply an action
    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        if action == Action::Quit {
            self.quit = true;
            return Ok(());
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if action == Action::Confirm {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if action == Action::SwitchView {
            self.switch_view(self.state.current_view.next()).await;
            return Ok(());
        }

        self.status_message = None;
        match self.state.current_view {
            View::Apply => self.handle_apply_action(action)?,
            View::Applications | View::Packages => self.handle_dashboard_action(action).await,
        }
        Ok(())
    }

    /// Show another view, loading dashboard data on first visit
    pub async fn switch_view(&mut self, view: View) {
        self.state.current_view = view;
        self.state.scroll_to_top();
        self.state.dashboard.selected_index = 0;
        if view != View::Apply && !self.state.dashboard_loaded {
            self.refresh_dashboard().await;
            self.state.dashboard_loaded = true;
        }
    }

    fn handle_apply_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Submit => {
                if self.is_submitting() {
                    self.status_message = Some("Submission already in progress".to_string());
                } else if self.start_submission() {
                    self.status_message = Some("Submitting application...".to_string());
                }
                return Ok(());
            }
            Action::CopyReference => return self.copy_reference(),
            Action::ScrollDown => {
                self.state.scroll_down();
                return Ok(());
            }
            Action::ScrollUp => {
                self.state.scroll_up();
                return Ok(());
            }
            _ => {}
        }

        let Some(form) = self.state.form_mut() else {
            return Ok(());
        };
        match action {
            Action::NextStep => {
                if form.advance() {
                    self.state.scroll_to_top();
                }
            }
            Action::PrevStep => {
                if form.retreat() {
                    self.state.scroll_to_top();
                }
            }
            Action::FocusNext => form.focus_next(),
            Action::FocusPrev => form.focus_prev(),
            Action::CycleNext => form.cycle(true),
            Action::CyclePrev => form.cycle(false),
            Action::Backspace => form.backspace(),
            Action::Input(' ') if !focused_accepts_text(form.active_control()) => form.activate(),
            Action::Input(c) => form.input_char(c),
            Action::Enter => {
                let multiline = matches!(
                    form.active_control(),
                    Some(Control::Field(field)) if field.is_multiline()
                );
                if multiline {
                    form.newline();
                } else if focused_accepts_text(form.active_control()) {
                    form.focus_next();
                } else {
                    form.activate();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_dashboard_action(&mut self, action: Action) {
        let on_packages = self.state.current_view == View::Packages;

        if self.state.dashboard.confirm.is_some() {
            match action {
                Action::Confirm => self.confirm_pending().await,
                Action::Cancel => {
                    self.state.dashboard.confirm = None;
                    self.state.dashboard.reject_notes.clear();
                }
                Action::Input(c) if self.is_rejecting() => {
                    self.state.dashboard.reject_notes.push(c)
                }
                Action::Backspace if self.is_rejecting() => {
                    self.state.dashboard.reject_notes.pop();
                }
                _ => {}
            }
            return;
        }

        if self.state.dashboard.restock_input.is_some() {
            match action {
                Action::Confirm => {
                    if !self.state.dashboard.submit_restock() {
                        self.status_message = Some("Quantity must be greater than 0".to_string());
                    }
                }
                Action::Cancel => self.state.dashboard.restock_input = None,
                Action::Input(c) => self.state.dashboard.restock_input_char(c),
                Action::Backspace => self.state.dashboard.restock_backspace(),
                _ => {}
            }
            return;
        }

        let dashboard = &mut self.state.dashboard;
        match action {
            Action::SelectUp => dashboard.move_selection_up(),
            Action::SelectDown => {
                let count = if on_packages {
                    dashboard.packages.len()
                } else {
                    dashboard.visible_applications().len()
                };
                dashboard.move_selection_down(count);
            }
            Action::Refresh => self.refresh_dashboard().await,
            Action::CycleFilter => {
                dashboard.cycle_filter();
                self.refresh_dashboard().await;
            }
            Action::ToggleSort => dashboard.toggle_sort(),
            Action::Approve => {
                if !dashboard.request_approve() {
                    self.status_message =
                        Some("Only pending applications can be approved".to_string());
                }
            }
            Action::Reject => {
                if !dashboard.request_reject() {
                    self.status_message =
                        Some("Only pending applications can be rejected".to_string());
                }
            }
            Action::Restock => {
                dashboard.begin_restock();
            }
            Action::Delete => {
                dashboard.request_delete();
            }
            _ => {}
        }
    }

    fn is_rejecting(&self) -> bool {
        matches!(
            self.state.dashboard.confirm,
            Some(PendingConfirm::Reject { .. })
        )
    }

    /// Reload the data behind the current dashboard view
    pub async fn refresh_dashboard(&mut self) {
        match self.state.current_view {
            View::Applications => {
                let status = self.state.dashboard.filter.status();
                match self.context.api.list_applications(status).await {
                    Ok(applications) => {
                        tracing::debug!("Loaded {} applications", applications.len());
                        self.state.dashboard.applications = applications;
                        self.state.dashboard.selected_index = 0;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load applications: {e:#}");
                        self.push_error(format!("Failed to load applications: {e}"));
                    }
                }
            }
            View::Packages => match self.context.api.list_managed_packages().await {
                Ok(packages) => {
                    tracing::debug!("Loaded {} packages", packages.len());
                    self.state.dashboard.packages = packages;
                    self.state.dashboard.selected_index = 0;
                }
                Err(e) => {
                    tracing::warn!("Failed to load packages: {e:#}");
                    self.push_error(format!("Failed to load packages: {e}"));
                }
            },
            View::Apply => {}
        }
    }

    /// Run the confirmed supervisor operation
    async fn confirm_pending(&mut self) {
        let Some(confirm) = self.state.dashboard.confirm.take() else {
            return;
        };
        let api = Arc::clone(&self.context.api);

        match confirm {
            PendingConfirm::Approve { id, reference } => {
                match api.approve_application(id, "").await {
                    Ok(response) => {
                        self.state
                            .dashboard
                            .record_review(id, ApplicationStatus::Approved);
                        self.status_message = Some(match response.pickup_code {
                            Some(code) => format!("Approved {reference}, pickup code {code}"),
                            None => response.message,
                        });
                        tracing::info!("Approved application {reference}");
                    }
                    Err(e) => self.push_error(format!("Failed to approve {reference}: {e}")),
                }
            }
            PendingConfirm::Reject { id, reference } => {
                let notes = std::mem::take(&mut self.state.dashboard.reject_notes);
                match api.reject_application(id, notes.trim()).await {
                    Ok(response) => {
                        self.state
                            .dashboard
                            .record_review(id, ApplicationStatus::Rejected);
                        self.status_message = Some(response.message);
                        tracing::info!("Rejected application {reference}");
                    }
                    Err(e) => self.push_error(format!("Failed to reject {reference}: {e}")),
                }
            }
            PendingConfirm::Restock { id, name, quantity } => {
                match api.restock_package(id, quantity).await {
                    Ok(response) => {
                        let current = self
                            .state
                            .dashboard
                            .packages
                            .iter()
                            .find(|p| p.id == id)
                            .map(|p| p.available_quantity)
                            .unwrap_or_default();
                        let available = response
                            .available_quantity
                            .unwrap_or_else(|| current.saturating_add(quantity));
                        self.state.dashboard.record_restock(id, available);
                        self.status_message = Some(response.message);
                        tracing::info!("Restocked {name} with {quantity} units");
                    }
                    Err(e) => self.push_error(format!("Failed to restock {name}: {e}")),
                }
            }
            PendingConfirm::Delete { id, name } => match api.delete_package(id).await {
                Ok(()) => {
                    self.state.dashboard.record_delete(id);
                    self.status_message = Some(format!("Deleted {name}"));
                    tracing::info!("Deleted package {name}");
                }
                Err(e) => self.push_error(format!("Failed to delete {name}: {e}")),
            },
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    /// Copy the reference number shown after a successful submission
    fn copy_reference(&mut self) -> Result<()> {
        let FormContainer::Success(block) = &self.state.container else {
            return Ok(());
        };
        let reference = block.reference_number.clone();
        if reference.is_empty() {
            return Ok(());
        }
        match self.copy_to_clipboard(&reference) {
            Ok(()) => self.status_message = Some(format!("Copied {reference}")),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {e:#}");
                self.push_error(format!("Could not copy to clipboard: {e}"));
            }
        }
        Ok(())
    }
}

fn focused_accepts_text(control: Option<&Control>) -> bool {
    matches!(control, Some(Control::Field(field)) if field.kind.accepts_text())
}

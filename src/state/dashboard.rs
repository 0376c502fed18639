//! Supervisor dashboard data: applications under review and package inventory

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Stock at or below this level is flagged as low
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Review status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    PickedUp,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::PickedUp => "Picked Up",
        }
    }

    /// Value used by the list endpoint's `status` filter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::PickedUp => "PICKED_UP",
        }
    }
}

/// An application as listed for supervisors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub reference_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub family_size: String,
    pub selected_package: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}

/// Filter applied to the applications list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl ApplicationFilter {
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Only(ApplicationStatus::Pending),
            Self::Only(ApplicationStatus::Pending) => Self::Only(ApplicationStatus::Approved),
            Self::Only(ApplicationStatus::Approved) => Self::Only(ApplicationStatus::Rejected),
            Self::Only(ApplicationStatus::Rejected) => Self::Only(ApplicationStatus::PickedUp),
            Self::Only(ApplicationStatus::PickedUp) => Self::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.label(),
        }
    }

    /// Status sent to the list endpoint, `None` for everything
    pub fn status(&self) -> Option<ApplicationStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }

    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => record.status == *status,
        }
    }
}

/// Sort order of the applications list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationSort {
    #[default]
    Newest,
    Name,
}

impl ApplicationSort {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Newest => Self::Name,
            Self::Name => Self::Newest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::Name => "Name",
        }
    }
}

/// Stock classification of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockLevel {
    pub fn classify(available: u32) -> Self {
        if available == 0 {
            Self::OutOfStock
        } else if available <= LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of stock",
            Self::LowStock => "Low stock",
            Self::InStock => "In stock",
        }
    }
}

/// A package as managed by supervisors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManagedPackage {
    pub id: u64,
    pub name: String,
    pub package_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_quantity: u32,
    #[serde(default)]
    pub available_quantity: u32,
    #[serde(default)]
    pub is_active: bool,
}

impl ManagedPackage {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.available_quantity)
    }
}

/// Write operation waiting for the supervisor's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    Approve { id: Uuid, reference: String },
    Reject { id: Uuid, reference: String },
    Restock { id: u64, name: String, quantity: u32 },
    Delete { id: u64, name: String },
}

impl PendingConfirm {
    pub fn prompt(&self) -> String {
        match self {
            Self::Approve { reference, .. } => format!("Approve application {reference}?"),
            Self::Reject { reference, .. } => format!("Reject application {reference}?"),
            Self::Restock { name, quantity, .. } => format!("Add {quantity} units to {name}?"),
            Self::Delete { name, .. } => format!("Delete package {name}? This cannot be undone."),
        }
    }
}

/// State of both supervisor views
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub applications: Vec<ApplicationRecord>,
    pub filter: ApplicationFilter,
    pub sort: ApplicationSort,
    pub packages: Vec<ManagedPackage>,
    pub selected_index: usize,
    /// Quantity being typed for a restock
    pub restock_input: Option<String>,
    /// Notes being typed for a rejection
    pub reject_notes: String,
    pub confirm: Option<PendingConfirm>,
}

impl Dashboard {
    /// Applications after filtering and sorting
    pub fn visible_applications(&self) -> Vec<&ApplicationRecord> {
        let mut visible: Vec<_> = self
            .applications
            .iter()
            .filter(|a| self.filter.matches(a))
            .collect();
        match self.sort {
            ApplicationSort::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ApplicationSort::Name => visible.sort_by_key(|a| a.full_name().to_lowercase()),
        }
        visible
    }

    pub fn selected_application(&self) -> Option<&ApplicationRecord> {
        self.visible_applications().get(self.selected_index).copied()
    }

    pub fn selected_package(&self) -> Option<&ManagedPackage> {
        self.packages.get(self.selected_index)
    }

    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected_index = 0;
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
        self.selected_index = 0;
    }

    /// Ask to approve the selected application; only pending ones qualify
    pub fn request_approve(&mut self) -> bool {
        match self.selected_application() {
            Some(app) if app.is_pending() => {
                self.confirm = Some(PendingConfirm::Approve {
                    id: app.id,
                    reference: app.reference_number.clone(),
                });
                true
            }
            _ => false,
        }
    }

    /// Ask to reject the selected application; only pending ones qualify
    pub fn request_reject(&mut self) -> bool {
        match self.selected_application() {
            Some(app) if app.is_pending() => {
                self.confirm = Some(PendingConfirm::Reject {
                    id: app.id,
                    reference: app.reference_number.clone(),
                });
                true
            }
            _ => false,
        }
    }

    /// Start typing a restock quantity for the selected package
    pub fn begin_restock(&mut self) -> bool {
        if self.selected_package().is_none() {
            return false;
        }
        self.restock_input = Some(String::new());
        true
    }

    pub fn restock_input_char(&mut self, c: char) {
        if let Some(input) = &mut self.restock_input {
            if c.is_ascii_digit() && input.len() < 6 {
                input.push(c);
            }
        }
    }

    pub fn restock_backspace(&mut self) {
        if let Some(input) = &mut self.restock_input {
            input.pop();
        }
    }

    /// Turn the typed quantity into a confirmation; zero or empty input is refused
    pub fn submit_restock(&mut self) -> bool {
        let quantity = self
            .restock_input
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|q| *q > 0);
        let Some(quantity) = quantity else {
            return false;
        };
        let Some(package) = self.selected_package() else {
            return false;
        };
        self.confirm = Some(PendingConfirm::Restock {
            id: package.id,
            name: package.name.clone(),
            quantity,
        });
        self.restock_input = None;
        true
    }

    pub fn request_delete(&mut self) -> bool {
        let Some(package) = self.selected_package() else {
            return false;
        };
        self.confirm = Some(PendingConfirm::Delete {
            id: package.id,
            name: package.name.clone(),
        });
        true
    }

    /// Apply a successful restock locally
    pub fn record_restock(&mut self, id: u64, available: u32) {
        if let Some(package) = self.packages.iter_mut().find(|p| p.id == id) {
            let added = available.saturating_sub(package.available_quantity);
            package.total_quantity = package.total_quantity.saturating_add(added);
            package.available_quantity = available;
        }
    }

    /// Apply a successful delete locally
    pub fn record_delete(&mut self, id: u64) {
        self.packages.retain(|p| p.id != id);
        if self.selected_index >= self.packages.len() {
            self.selected_index = self.packages.len().saturating_sub(1);
        }
    }

    /// Apply a successful review locally
    pub fn record_review(&mut self, id: Uuid, status: ApplicationStatus) {
        if let Some(app) = self.applications.iter_mut().find(|a| a.id == id) {
            app.status = status;
        }
    }
}

//! Trait abstraction for the API client to enable mocking in tests

use crate::state::{
    ApplicationRecord, ApplicationStatus, CatalogOption, FormState, ManagedPackage,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::client::{ActionResponse, ApiClient, SubmitOutcome};

/// Trait for relief API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Load the public package catalog
    async fn available_packages(&self) -> Result<Vec<CatalogOption>>;

    /// Submit a captured application form
    async fn submit_application(&self, state: &FormState) -> Result<SubmitOutcome>;

    /// List applications for review
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>>;

    /// Approve a pending application
    async fn approve_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse>;

    /// Reject a pending application
    async fn reject_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse>;

    /// List packages with stock levels
    async fn list_managed_packages(&self) -> Result<Vec<ManagedPackage>>;

    /// Add stock to a package
    async fn restock_package(&self, id: u64, quantity: u32) -> Result<ActionResponse>;

    /// Delete a package
    async fn delete_package(&self, id: u64) -> Result<()>;
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn available_packages(&self) -> Result<Vec<CatalogOption>> {
        ApiClient::available_packages(self).await
    }

    async fn submit_application(&self, state: &FormState) -> Result<SubmitOutcome> {
        ApiClient::submit_application(self, state).await
    }

    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>> {
        ApiClient::list_applications(self, status).await
    }

    async fn approve_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse> {
        ApiClient::approve_application(self, id, notes).await
    }

    async fn reject_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse> {
        ApiClient::reject_application(self, id, notes).await
    }

    async fn list_managed_packages(&self) -> Result<Vec<ManagedPackage>> {
        ApiClient::list_managed_packages(self).await
    }

    async fn restock_package(&self, id: u64, quantity: u32) -> Result<ActionResponse> {
        ApiClient::restock_package(self, id, quantity).await
    }

    async fn delete_package(&self, id: u64) -> Result<()> {
        ApiClient::delete_package(self, id).await
    }
}

//! Relief API client module for HTTP communication

mod client;
mod csrf;
mod error;
mod traits;

pub use client::{ApiClient, SubmitOutcome};
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use client::ActionResponse;
#[cfg(test)]
pub use traits::MockApiClientTrait;

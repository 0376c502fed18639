//! Application state module

mod app_state;
mod catalog;
mod dashboard;
mod forms;
mod result;

pub use app_state::*;
pub use catalog::*;
pub use dashboard::*;
pub use forms::*;
pub use result::*;

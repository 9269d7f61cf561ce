//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic on behalf of the outer adapters.

pub mod detail;
pub mod error;
pub mod services;

pub use detail::PositionDetail;
pub use error::{ApplicationError, ApplicationResult};
pub use services::OrgChartSession;

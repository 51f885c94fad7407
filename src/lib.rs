pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::GroupStayError;
pub use crate::core::services::GroupStayService;
pub use crate::infrastructure::booking::in_memory::InMemoryBookingEngine;
pub use crate::infrastructure::notify::in_memory::InMemoryNotifier;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests; // Include integration tests

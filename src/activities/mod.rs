// Module declarations
pub(crate) mod activities_constants;
pub(crate) mod activities_errors;
pub(crate) mod activities_model;
pub(crate) mod activities_repository;
pub(crate) mod activities_service;

// Re-export the public interface
pub use activities_constants::*;
pub use activities_model::{ActivityLogEntry, NewActivityLogEntry};
pub use activities_repository::ActivityRepository;
pub use activities_service::ActivityService;

// Re-export error types for convenience
pub use activities_errors::{ActivityError, Result};

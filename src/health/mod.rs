// src/health/mod.rs
mod checker;
mod directory;
mod source;
mod status;

pub use checker::{Checker, CheckerError};
pub use directory::CheckerDirectory;
pub use source::{CallbackSource, StatusSource};
pub use status::{ComponentHealth, HealthReport, HealthStatus};

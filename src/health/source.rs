// src/health/source.rs
use super::checker::Checker;
use super::status::HealthStatus;
use std::fmt;

/// Anything the probe server can ask for the current aggregate status.
pub trait StatusSource: Send + Sync {
    fn status(&self) -> HealthStatus;
}

impl StatusSource for Checker {
    fn status(&self) -> HealthStatus {
        Checker::status(self)
    }
}

/// Adapts a plain closure returning `(healthy, description)`.
pub struct CallbackSource<F> {
    callback: F,
}

impl<F> CallbackSource<F>
where
    F: Fn() -> (bool, String) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> StatusSource for CallbackSource<F>
where
    F: Fn() -> (bool, String) + Send + Sync,
{
    fn status(&self) -> HealthStatus {
        (self.callback)().into()
    }
}

impl<F> fmt::Debug for CallbackSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSource").finish_non_exhaustive()
    }
}

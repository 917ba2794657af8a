use chrono::{DateTime, Local};

/// Source of the current instant.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider(pub DateTime<Local>);

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

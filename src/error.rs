//! Our error types for the regulation modes.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong inside the regulation core.
///
/// No variant is fatal: the worst case on any error path is "setpoint
/// unchanged, operation reported as failed to the caller".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Requested value lies outside the setpoint's current `[min, max]`.
    #[error("value out of range")]
    Range,
    /// Parameter name not recognized by this mode.
    #[error("unknown parameter name")]
    UnknownParameter,
    /// The persistent store rejected a write.
    #[error("persistent store write failed")]
    Persistence,
}

//! Scheduler error types.

use thiserror::Error;

/// Errors surfaced by scheduler configuration and lifecycle calls.
///
/// Normal termination — a worker exhausting its iteration allotment, or
/// observing `stop`/`abort` — is signalled through
/// [`Poll::Complete`](crate::Poll::Complete), never through an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// `start` was called before an update function was configured.
    ///
    /// Polling without an update function would schedule undefined work, so
    /// the scheduler refuses to start rather than silently no-op.
    #[error("no update function configured; set one before calling start()")]
    MissingUpdateFunction,

    /// `set_option` received an option this scheduler does not support.
    ///
    /// Unsupported options are never silently ignored: the caller asked for
    /// behavior the chromatic scheduler cannot provide.
    #[error("unsupported scheduler option `{0}`")]
    UnsupportedOption(&'static str),
}

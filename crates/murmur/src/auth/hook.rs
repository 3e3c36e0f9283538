//! Session invalidation hook.

/// Callback fired when the session becomes unrecoverable.
///
/// The request gateway invokes this once per failed refresh cycle, after
/// the stored credential pair has been cleared. The hook is fire-and-forget:
/// its outcome cannot influence the failing call, so implementations should
/// not block and must not panic.
pub trait SessionHook: Send + Sync {
    /// Called after the stored credentials have been cleared.
    fn session_invalidated(&self);
}

/// A hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl SessionHook for NoopHook {
    fn session_invalidated(&self) {}
}

impl<F> SessionHook for F
where
    F: Fn() + Send + Sync,
{
    fn session_invalidated(&self) {
        self()
    }
}

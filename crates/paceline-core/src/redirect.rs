//! Hook for sending the user back to a login surface.

/// Called once for every request the server rejects with 401, after the
/// session has been cleared.
///
/// A graphical host would navigate to its login page here; the CLI prints a
/// hint. Implementations must not block.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

impl<F> LoginRedirect for F
where
    F: Fn() + Send + Sync,
{
    fn redirect_to_login(&self) {
        self()
    }
}

/// A redirect that does nothing. Used by headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self) {}
}

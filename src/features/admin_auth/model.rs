/// Proof that the current request carries a valid admin session.
///
/// Only `require_admin_session` inserts this into request extensions;
/// handlers take it as an extractor instead of re-reading the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    _verified: (),
}

impl AdminSession {
    pub(crate) fn verified() -> Self {
        Self { _verified: () }
    }
}

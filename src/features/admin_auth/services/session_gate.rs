use cookie::Cookie;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::core::config::AdminAuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::admin_auth::services::CookiePolicy;
use crate::shared::constants::ADMIN_SESSION_SENTINEL;

/// Opaque value stored in the admin session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shared-password admin access control.
///
/// Stateless: a session is valid iff the presented cookie value equals the
/// sentinel. Expiry is left to the cookie max-age on the client.
pub struct SessionGate {
    password: String,
    cookie_policy: CookiePolicy,
}

impl SessionGate {
    pub fn new(config: &AdminAuthConfig) -> Self {
        Self {
            password: config.password.clone(),
            cookie_policy: CookiePolicy::from_config(config),
        }
    }

    /// Exchange the admin password for a session token
    pub fn login(&self, credential: &str) -> Result<SessionToken> {
        if !secure_compare(credential, &self.password) {
            warn!("Admin login rejected: invalid password");
            return Err(AppError::InvalidCredentials("Invalid password".to_string()));
        }

        info!("Admin login succeeded");
        Ok(SessionToken(ADMIN_SESSION_SENTINEL.to_string()))
    }

    /// Whether a presented cookie value is a valid session. Never fails.
    pub fn check(&self, token: Option<&str>) -> bool {
        token
            .map(|t| secure_compare(t, ADMIN_SESSION_SENTINEL))
            .unwrap_or(false)
    }

    /// Cookie that carries `token` back to the client
    pub fn session_cookie(&self, token: &SessionToken, request_is_https: bool) -> Cookie<'static> {
        self.cookie_policy
            .session_cookie(token.as_str(), request_is_https)
    }

    /// Cookie that clears the session, whatever state the client is in
    pub fn logout(&self, request_is_https: bool) -> Cookie<'static> {
        self.cookie_policy.removal_cookie(request_is_https)
    }
}

/// Compare digests so neither the content nor the length leaks through timing
fn secure_compare(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());
    a.as_slice().ct_eq(b.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CookieSecurity;
    use cookie::SameSite;
    use fake::faker::internet::en::Password;
    use fake::Fake;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    const PASSWORD: &str = "Cocomelone22*";

    fn gate() -> SessionGate {
        SessionGate::new(&AdminAuthConfig {
            password: PASSWORD.to_string(),
            session_max_age: Duration::from_secs(24 * 60 * 60),
            cookie_security: CookieSecurity::Auto,
            cookie_same_site: SameSite::Lax,
        })
    }

    #[test]
    fn test_login_with_configured_password_issues_sentinel() {
        let gate = gate();
        let token = assert_ok!(gate.login(PASSWORD));
        assert_eq!(token.as_str(), ADMIN_SESSION_SENTINEL);
        assert!(gate.check(Some(token.as_str())));
    }

    #[test]
    fn test_login_rejects_other_credentials() {
        let gate = gate();
        for credential in ["", "wrong", "cocomelone22*", "Cocomelone22", "Cocomelone22* "] {
            let err = assert_err!(gate.login(credential));
            assert!(matches!(err, AppError::InvalidCredentials(ref m) if m == "Invalid password"));
        }

        for _ in 0..50 {
            let credential: String = Password(1..32).fake();
            if credential == PASSWORD {
                continue;
            }
            assert_err!(gate.login(&credential));
        }
    }

    #[test]
    fn test_check_without_or_with_wrong_token_is_false() {
        let gate = gate();
        assert!(!gate.check(None));
        assert!(!gate.check(Some("")));
        assert!(!gate.check(Some("authenticated ")));
        assert!(!gate.check(Some(PASSWORD)));
    }

    #[test]
    fn test_session_cookie_carries_token() {
        let gate = gate();
        let token = gate.login(PASSWORD).unwrap();
        let cookie = gate.session_cookie(&token, true);
        assert_eq!(cookie.value(), ADMIN_SESSION_SENTINEL);
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_logout_cookie_fails_check() {
        let gate = gate();
        let cookie = gate.logout(false);
        assert!(!gate.check(Some(cookie.value())));
    }
}

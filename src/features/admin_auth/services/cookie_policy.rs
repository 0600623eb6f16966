use axum::http::{HeaderMap, Uri};
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};

use crate::core::config::{AdminAuthConfig, CookieSecurity};
use crate::shared::constants::ADMIN_SESSION_COOKIE;

/// Attributes applied to the admin session cookie
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    security: CookieSecurity,
    same_site: SameSite,
    max_age_secs: i64,
}

impl CookiePolicy {
    pub fn from_config(config: &AdminAuthConfig) -> Self {
        Self {
            security: config.cookie_security,
            same_site: config.cookie_same_site,
            max_age_secs: i64::try_from(config.session_max_age.as_secs()).unwrap_or(i64::MAX),
        }
    }

    fn secure(&self, request_is_https: bool) -> bool {
        match self.security {
            CookieSecurity::Always => true,
            CookieSecurity::Never => false,
            CookieSecurity::Auto => request_is_https,
        }
    }

    /// Cookie carrying `value` for the configured max-age
    pub fn session_cookie(&self, value: &str, request_is_https: bool) -> Cookie<'static> {
        Cookie::build((ADMIN_SESSION_COOKIE, value.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure(request_is_https))
            .same_site(self.same_site)
            .max_age(CookieDuration::seconds(self.max_age_secs))
            .build()
    }

    /// Empty, already-expired cookie that makes the client drop the session
    pub fn removal_cookie(&self, request_is_https: bool) -> Cookie<'static> {
        let mut cookie = Cookie::build((ADMIN_SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure(request_is_https))
            .same_site(self.same_site)
            .build();
        cookie.make_removal();
        cookie
    }
}

/// True when the request reached us over HTTPS, directly or via a TLS-terminating proxy
pub fn is_https_request(headers: &HeaderMap, uri: &Uri) -> bool {
    if uri.scheme_str() == Some("https") {
        return true;
    }

    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

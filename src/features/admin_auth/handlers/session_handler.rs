use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    Json,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin_auth::dtos::{LoginRequestDto, SessionStatusDto};
use crate::features::admin_auth::services::{is_https_request, SessionGate};
use crate::shared::constants::ADMIN_SESSION_COOKIE;
use crate::shared::types::{ErrorResponse, SuccessResponse};

/// Log in to the admin panel
///
/// Sets the `admin_session` cookie when the password matches.
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = SuccessResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn login(
    State(gate): State<Arc<SessionGate>>,
    jar: CookieJar,
    uri: Uri,
    headers: HeaderMap,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let token = gate.login(&dto.password)?;
    let cookie = gate.session_cookie(&token, is_https_request(&headers, &uri));

    Ok((
        jar.add(cookie),
        Json(SuccessResponse::with_message("Login successful")),
    ))
}

/// Log out of the admin panel
///
/// Always clears the session cookie.
#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    ),
    tag = "admin"
)]
pub async fn logout(
    State(gate): State<Arc<SessionGate>>,
    jar: CookieJar,
    uri: Uri,
    headers: HeaderMap,
) -> (CookieJar, Json<SuccessResponse>) {
    let cookie = gate.logout(is_https_request(&headers, &uri));
    (jar.add(cookie), Json(SuccessResponse::ok()))
}

/// Check whether the caller holds an admin session
#[utoipa::path(
    get,
    path = "/admin/check",
    responses(
        (status = 200, description = "Session status", body = SessionStatusDto)
    ),
    tag = "admin"
)]
pub async fn check_session(
    State(gate): State<Arc<SessionGate>>,
    jar: CookieJar,
) -> Json<SessionStatusDto> {
    let token = jar.get(ADMIN_SESSION_COOKIE).map(|c| c.value());

    Json(SessionStatusDto {
        is_authenticated: gate.check(token),
    })
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request DTO for admin login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Shared admin password
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Response DTO for the session check endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusDto {
    /// Whether the request carries a valid admin session cookie
    pub is_authenticated: bool,
}

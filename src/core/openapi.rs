use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin_auth::{dtos as admin_auth_dtos, handlers as admin_auth_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::constants::ADMIN_SESSION_COOKIE;
use crate::shared::types::{ErrorResponse, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Admin session
        admin_auth_handlers::login,
        admin_auth_handlers::logout,
        admin_auth_handlers::check_session,
        // Uploads (admin session required)
        uploads_handlers::upload_single,
        uploads_handlers::upload_multiple,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            SuccessResponse,
            // Admin session
            admin_auth_dtos::LoginRequestDto,
            admin_auth_dtos::SessionStatusDto,
            // Uploads
            uploads_dtos::UploadSingleFileDto,
            uploads_dtos::UploadMultipleFilesDto,
            uploads_dtos::UploadedFileDto,
            uploads_dtos::SingleUploadResponseDto,
            uploads_dtos::MultipleUploadResponseDto,
        )
    ),
    tags(
        (name = "admin", description = "Admin session login, logout and status"),
        (name = "uploads", description = "Product image uploads to object storage"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "API documentation for the storefront admin backend",
    )
)]
pub struct ApiDoc;

/// Adds the admin session cookie security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ADMIN_SESSION_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/admin/login",
            "/admin/logout",
            "/admin/check",
            "/upload/single",
            "/upload/multiple",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_openapi_has_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("admin_session"));
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Shop".to_string(),
            version: "2.0.0".to_string(),
            description: "Shop admin".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "2.0.0");
        assert_eq!(doc.info.description.as_deref(), Some("Shop admin"));
    }
}

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;

use crate::core::middleware;
use crate::features::admin_auth::{routes as admin_auth_routes, SessionGate};
use crate::features::uploads::{routes as uploads_routes, UploadService};

/// Services shared by the HTTP layer
pub struct AppServices {
    pub session_gate: Arc<SessionGate>,
    pub upload_service: Arc<UploadService>,
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All API routes, without the cross-cutting layers added in `main`
pub fn api_routes(services: AppServices) -> Router {
    // Upload routes require an admin session
    let protected_routes = uploads_routes::routes(services.upload_service).route_layer(
        from_fn_with_state(
            Arc::clone(&services.session_gate),
            middleware::require_admin_session,
        ),
    );

    // Public routes (no auth required)
    let public_routes = admin_auth_routes::routes(services.session_gate)
        .route("/health", get(health_check));

    Router::new().merge(protected_routes).merge(public_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AdminAuthConfig, CookieSecurity, UploadConfig};
    use crate::shared::constants::{ADMIN_SESSION_COOKIE, ADMIN_SESSION_SENTINEL};
    use crate::shared::test_helpers::InMemoryStorage;
    use axum::http::{header::SET_COOKIE, HeaderName, HeaderValue};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use cookie::time::Duration as CookieDuration;
    use cookie::{Cookie, SameSite};
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::time::Duration;

    const PASSWORD: &str = "Cocomelone22*";

    fn test_server_with(upload_config: UploadConfig) -> (TestServer, Arc<InMemoryStorage>) {
        test_server_with_storage(upload_config, Arc::new(InMemoryStorage::new()))
    }

    fn test_server_with_storage(
        upload_config: UploadConfig,
        storage: Arc<InMemoryStorage>,
    ) -> (TestServer, Arc<InMemoryStorage>) {
        let session_gate = Arc::new(SessionGate::new(&AdminAuthConfig {
            password: PASSWORD.to_string(),
            session_max_age: Duration::from_secs(24 * 60 * 60),
            cookie_security: CookieSecurity::Auto,
            cookie_same_site: SameSite::Lax,
        }));
        let upload_service = Arc::new(UploadService::new(storage.clone(), upload_config));

        let router = api_routes(AppServices {
            session_gate,
            upload_service,
        });

        (TestServer::new(router).unwrap(), storage)
    }

    fn test_server() -> (TestServer, Arc<InMemoryStorage>) {
        test_server_with(UploadConfig::default())
    }

    fn session_cookie() -> Cookie<'static> {
        Cookie::new(ADMIN_SESSION_COOKIE, ADMIN_SESSION_SENTINEL)
    }

    fn image_part(name: &str, mime_type: &str, size: usize) -> Part {
        Part::bytes(vec![0x89; size])
            .file_name(name)
            .mime_type(mime_type)
    }

    fn set_cookie_headers(response: &axum_test::TestResponse) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_login_with_correct_password_sets_cookie() {
        let (server, _) = test_server();

        let response = server
            .post("/admin/login")
            .json(&json!({ "password": PASSWORD }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);

        let cookie = response.cookie(ADMIN_SESSION_COOKIE);
        assert_eq!(cookie.value(), ADMIN_SESSION_SENTINEL);
        assert_eq!(cookie.max_age(), Some(CookieDuration::hours(24)));
        assert_eq!(cookie.http_only(), Some(true));

        let check = server.get("/admin/check").add_cookie(cookie).await;
        assert_eq!(check.json::<Value>(), json!({ "isAuthenticated": true }));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_rejected() {
        let (server, _) = test_server();

        let response = server
            .post("/admin/login")
            .json(&json!({ "password": "wrong" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Invalid password" })
        );
        assert!(set_cookie_headers(&response).is_empty());
    }

    #[tokio::test]
    async fn test_login_without_password_field_is_bad_request() {
        let (server, _) = test_server();

        let response = server.post("/admin/login").json(&json!({})).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(set_cookie_headers(&response).is_empty());
    }

    #[tokio::test]
    async fn test_login_behind_https_proxy_sets_secure_cookie() {
        let (server, _) = test_server();

        let response = server
            .post("/admin/login")
            .add_header(
                HeaderName::from_static("x-forwarded-proto"),
                HeaderValue::from_static("https"),
            )
            .json(&json!({ "password": PASSWORD }))
            .await;

        assert_eq!(response.cookie(ADMIN_SESSION_COOKIE).secure(), Some(true));
    }

    #[tokio::test]
    async fn test_check_without_cookie_is_false() {
        let (server, _) = test_server();

        let response = server.get("/admin/check").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "isAuthenticated": false }));

        let forged = server
            .get("/admin/check")
            .add_cookie(Cookie::new(ADMIN_SESSION_COOKIE, "admin"))
            .await;
        assert_eq!(forged.json::<Value>(), json!({ "isAuthenticated": false }));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie_then_check_is_false() {
        let (server, _) = test_server();

        let response = server
            .post("/admin/logout")
            .add_cookie(session_cookie())
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "success": true }));

        let cleared = response.cookie(ADMIN_SESSION_COOKIE);
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(CookieDuration::ZERO));

        let check = server.get("/admin/check").add_cookie(cleared).await;
        assert_eq!(check.json::<Value>(), json!({ "isAuthenticated": false }));
    }

    #[tokio::test]
    async fn test_logout_without_session_still_clears_cookie() {
        let (server, _) = test_server();

        let response = server.post("/admin/logout").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let headers = set_cookie_headers(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("admin_session="));
        assert!(headers[0].contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_upload_requires_admin_session() {
        let (server, storage) = test_server();

        let form = MultipartForm::new().add_part("file", image_part("tee.png", "image/png", 16));
        let response = server.post("/upload/single").multipart(form).await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["success"], false);
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_single_image() {
        let (server, storage) = test_server();

        let form =
            MultipartForm::new().add_part("file", image_part("Hoodie Front.JPG", "image/jpeg", 64));
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(body["filename"], "Hoodie Front.JPG");
        assert_eq!(body["mimetype"], "image/jpeg");
        assert_eq!(body["size"], 64);

        let key = body["key"].as_str().unwrap();
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(body["url"], storage.url_for(key));
        assert!(storage.contains(key));
        assert_eq!(storage.content_type_of(key).as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_upload_single_pdf_is_rejected_without_storing() {
        let (server, storage) = test_server();

        let form = MultipartForm::new().add_part(
            "file",
            image_part("lookbook.pdf", "application/pdf", 32),
        );
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert!(response.status_code().is_server_error());
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid file type"));
        assert_eq!(storage.put_count(), 0);
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_single_without_file_is_missing() {
        let (server, storage) = test_server();

        let form = MultipartForm::new().add_text("note", "no file here");
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No file uploaded");
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_single_empty_file_input_is_missing() {
        let (server, storage) = test_server();

        let empty = Part::bytes(Vec::<u8>::new())
            .file_name("")
            .mime_type("application/octet-stream");
        let form = MultipartForm::new().add_part("file", empty);
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No file uploaded");
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_single_jpg_alias_is_stored_as_jpeg() {
        let (server, storage) = test_server();

        let form = MultipartForm::new().add_part("file", image_part("cap.jpg", "image/jpg", 8));
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["mimetype"], "image/jpeg");
        let key = body["key"].as_str().unwrap();
        assert_eq!(storage.content_type_of(key).as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_upload_single_unexpected_field_is_rejected() {
        let (server, storage) = test_server();

        let form =
            MultipartForm::new().add_part("image", image_part("tee.png", "image/png", 8));
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_single_over_ceiling_is_too_large() {
        let (server, storage) = test_server_with(UploadConfig {
            max_file_size: 1024,
            ..UploadConfig::default()
        });

        let form = MultipartForm::new().add_part("file", image_part("big.png", "image/png", 4096));
        let response = server
            .post("/upload/single")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_multiple_images_get_distinct_keys() {
        let (server, storage) = test_server();

        let form = MultipartForm::new()
            .add_part("files", image_part("front.jpg", "image/jpeg", 10))
            .add_part("files", image_part("back.jpg", "image/jpeg", 20))
            .add_part("files", image_part("detail.webp", "image/webp", 30));
        let response = server
            .post("/upload/multiple")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);

        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 3);
        let keys: HashSet<&str> = files.iter().map(|f| f["key"].as_str().unwrap()).collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(storage.put_count(), 3);
    }

    #[tokio::test]
    async fn test_upload_multiple_over_limit_is_rejected() {
        let (server, storage) = test_server();

        let form = (0..11).fold(MultipartForm::new(), |form, i| {
            form.add_part("files", image_part(&format!("{}.png", i), "image/png", 4))
        });
        let response = server
            .post("/upload/multiple")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_multiple_without_files_is_missing() {
        let (server, _) = test_server();

        let form = MultipartForm::new().add_text("collection", "fw24");
        let response = server
            .post("/upload/multiple")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No files uploaded");
    }

    #[tokio::test]
    async fn test_upload_multiple_fails_when_one_write_fails() {
        let (server, storage) = test_server_with_storage(
            UploadConfig::default(),
            Arc::new(InMemoryStorage::failing_on(".gif")),
        );

        let form = MultipartForm::new()
            .add_part("files", image_part("a.png", "image/png", 4))
            .add_part("files", image_part("b.gif", "image/gif", 4));
        let response = server
            .post("/upload/multiple")
            .add_cookie(session_cookie())
            .multipart(form)
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to upload file");
        assert!(body.get("files").is_none());
        assert_eq!(storage.put_count(), 2);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = test_server();
        server.get("/health").await.assert_status_ok();
    }
}

use std::env;
use std::time::Duration;

use cookie::SameSite;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub admin_auth: AdminAuthConfig,
    pub upload: UploadConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// When the session cookie carries the `Secure` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSecurity {
    Always,
    Never,
    /// Secure only when the request arrived over HTTPS
    Auto,
}

/// Admin session gate configuration
#[derive(Clone)]
pub struct AdminAuthConfig {
    /// Shared admin password checked on login
    pub password: String,
    /// Lifetime of the session cookie (client-enforced)
    pub session_max_age: Duration,
    pub cookie_security: CookieSecurity,
    pub cookie_same_site: SameSite,
}

// Redacts the password
impl std::fmt::Debug for AdminAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthConfig")
            .field("password", &"***")
            .field("session_max_age", &self.session_max_age)
            .field("cookie_security", &self.cookie_security)
            .field("cookie_same_site", &self.cookie_same_site)
            .finish()
    }
}

/// Upload ingress limits
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Per-file size ceiling in bytes
    pub max_file_size: usize,
    /// Maximum number of files accepted by the multi-file endpoint
    pub max_files: usize,
    /// First path segment of every generated storage key
    pub key_prefix: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for file uploads
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for publicly accessible files (optional, defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for storing files
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            admin_auth: AdminAuthConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AdminAuthConfig {
    /// Compiled-in password, only honoured with ADMIN_ALLOW_DEFAULT_PASSWORD=true
    pub const DEFAULT_PASSWORD: &'static str = "Cocomelone22*";
    const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 24 * 60 * 60; // 24 hours

    pub fn from_env() -> Result<Self, String> {
        let allow_default = env::var("ADMIN_ALLOW_DEFAULT_PASSWORD")
            .map(|v| parse_bool(&v))
            .unwrap_or(Ok(false))
            .map_err(|_| "ADMIN_ALLOW_DEFAULT_PASSWORD must be true or false".to_string())?;

        let password = resolve_admin_password(env::var("ADMIN_PASSWORD").ok(), allow_default)?;

        let max_age_secs = env::var("ADMIN_SESSION_MAX_AGE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_MAX_AGE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ADMIN_SESSION_MAX_AGE_SECS must be a valid number".to_string())?;

        let cookie_security = parse_cookie_security(
            &env::var("ADMIN_COOKIE_SECURE").unwrap_or_else(|_| "auto".to_string()),
        )?;

        let cookie_same_site = parse_same_site(
            &env::var("ADMIN_COOKIE_SAME_SITE").unwrap_or_else(|_| "lax".to_string()),
        )?;

        Ok(Self {
            password,
            session_max_age: Duration::from_secs(max_age_secs),
            cookie_security,
            cookie_same_site,
        })
    }
}

/// Pick the admin password. An empty or missing ADMIN_PASSWORD is an error
/// unless the operator opted in to the compiled default.
pub fn resolve_admin_password(
    configured: Option<String>,
    allow_default: bool,
) -> Result<String, String> {
    match configured.filter(|p| !p.is_empty()) {
        Some(password) => Ok(password),
        None if allow_default => {
            tracing::warn!(
                "ADMIN_PASSWORD not set; using the compiled-in default admin password. \
                 Do not run like this in production."
            );
            Ok(AdminAuthConfig::DEFAULT_PASSWORD.to_string())
        }
        None => Err(
            "ADMIN_PASSWORD must be set (or ADMIN_ALLOW_DEFAULT_PASSWORD=true to use the default)"
                .to_string(),
        ),
    }
}

fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(()),
    }
}

fn parse_cookie_security(value: &str) -> Result<CookieSecurity, String> {
    match value.trim().to_lowercase().as_str() {
        "auto" => Ok(CookieSecurity::Auto),
        "true" | "always" => Ok(CookieSecurity::Always),
        "false" | "never" => Ok(CookieSecurity::Never),
        other => Err(format!(
            "ADMIN_COOKIE_SECURE must be auto, always or never (got '{}')",
            other
        )),
    }
}

fn parse_same_site(value: &str) -> Result<SameSite, String> {
    match value.trim().to_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        other => Err(format!(
            "ADMIN_COOKIE_SAME_SITE must be strict, lax or none (got '{}')",
            other
        )),
    }
}

impl UploadConfig {
    const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024; // 50MB
    const DEFAULT_MAX_FILES: usize = 10;

    pub fn from_env() -> Result<Self, String> {
        let max_file_size = env::var("UPLOAD_MAX_FILE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_FILE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "UPLOAD_MAX_FILE_SIZE must be a valid number".to_string())?;

        let max_files = env::var("UPLOAD_MAX_FILES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_FILES.to_string())
            .parse::<usize>()
            .map_err(|_| "UPLOAD_MAX_FILES must be a valid number".to_string())?;

        if max_files == 0 {
            return Err("UPLOAD_MAX_FILES must be at least 1".to_string());
        }

        let key_prefix = env::var("UPLOAD_KEY_PREFIX")
            .unwrap_or_else(|_| "uploads".to_string())
            .trim_matches('/')
            .to_string();

        if key_prefix.is_empty() {
            return Err("UPLOAD_KEY_PREFIX must not be empty".to_string());
        }

        Ok(Self {
            max_file_size,
            max_files,
            key_prefix,
        })
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            max_files: Self::DEFAULT_MAX_FILES,
            key_prefix: "uploads".to_string(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Storefront API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Admin session and upload API for the storefront".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket =
            env::var("MINIO_BUCKET").unwrap_or_else(|_| "storefront-uploads".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            public_endpoint: public_endpoint.trim_end_matches('/').to_string(),
            access_key,
            secret_key,
            bucket,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_admin_password_prefers_configured_value() {
        let password = resolve_admin_password(Some("s3cret".to_string()), true).unwrap();
        assert_eq!(password, "s3cret");
    }

    #[test]
    fn test_resolve_admin_password_refuses_implicit_default() {
        assert!(resolve_admin_password(None, false).is_err());
        assert!(resolve_admin_password(Some(String::new()), false).is_err());
    }

    #[test]
    fn test_resolve_admin_password_default_requires_opt_in() {
        let password = resolve_admin_password(None, true).unwrap();
        assert_eq!(password, AdminAuthConfig::DEFAULT_PASSWORD);
    }

    #[test]
    fn test_parse_cookie_security() {
        assert_eq!(parse_cookie_security("auto").unwrap(), CookieSecurity::Auto);
        assert_eq!(parse_cookie_security("TRUE").unwrap(), CookieSecurity::Always);
        assert_eq!(parse_cookie_security("never").unwrap(), CookieSecurity::Never);
        assert!(parse_cookie_security("sometimes").is_err());
    }

    #[test]
    fn test_parse_same_site() {
        assert_eq!(parse_same_site("Strict").unwrap(), SameSite::Strict);
        assert_eq!(parse_same_site("lax").unwrap(), SameSite::Lax);
        assert!(parse_same_site("loose").is_err());
    }

    #[test]
    fn test_upload_config_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.max_file_size, 50 * 1024 * 1024);
        assert_eq!(config.max_files, 10);
        assert_eq!(config.key_prefix, "uploads");
    }

    #[test]
    fn test_admin_auth_config_debug_redacts_password() {
        let config = AdminAuthConfig {
            password: "hunter2".to_string(),
            session_max_age: Duration::from_secs(60),
            cookie_security: CookieSecurity::Auto,
            cookie_same_site: SameSite::Lax,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}

//! Authentication configuration

use serde::{Deserialize, Serialize};

/// JWT and refresh token configuration
///
/// Every field is required at startup. Empty strings and non-positive
/// lifetimes are rejected when the token service is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing secret (HS256)
    #[serde(default)]
    pub secret: String,

    /// JWT issuer claim
    #[serde(default)]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: String::from("stockband"),
            audience: Some(String::from("stockband-api")),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604800,  // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Whether a signing secret has been provided
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

/// Token cookies set on login and refresh
///
/// Both cookies are HttpOnly. The access token cookie is accepted by the
/// bearer middleware when no `Authorization` header is sent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie carrying the access token
    pub access_token_name: String,

    /// Cookie carrying the refresh token
    pub refresh_token_name: String,

    /// Mark cookies `Secure` (HTTPS only)
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_token_name: String::from("stockband_access_token"),
            refresh_token_name: String::from("stockband_refresh_token"),
            secure: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt cost factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default)]
    pub cookies: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            cookies: CookieConfig::default(),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.audience.as_deref(), Some("stockband-api"));
        assert!(!config.has_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(config.has_secret());
    }

    #[test]
    fn test_cookie_names_are_distinct() {
        let cookies = AuthConfig::default().cookies;
        assert_ne!(cookies.access_token_name, cookies.refresh_token_name);
        assert!(cookies.secure);
    }
}

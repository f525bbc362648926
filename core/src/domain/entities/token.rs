//! Token entities for JWT access tokens and rotating refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,

    /// Username
    #[serde(default)]
    pub name: String,

    /// Email
    #[serde(default)]
    pub email: String,

    /// Role claim ("User" or "Admin")
    #[serde(default)]
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's identifier
    /// * `username` - The user's display name
    /// * `email` - The user's email
    /// * `role` - The user's role
    /// * `issuer` - Configured issuer
    /// * `audience` - Configured audience
    /// * `lifetime` - Access token lifetime
    pub fn new_access_token(
        user_id: i32,
        username: &str,
        email: &str,
        role: UserRole,
        issuer: &str,
        audience: &str,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_id.to_string(),
            name: username.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Parses the subject as a user ID
    pub fn user_id(&self) -> Result<i32, std::num::ParseIntError> {
        self.sub.parse::<i32>()
    }
}

/// Why a refresh token was revoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RevocationReason {
    /// Not revoked
    #[default]
    None,
    /// Rotated into a successor
    Replaced,
    /// Revoked on request (logout)
    Manual,
    /// Revoked because a consumed token in its chain was presented again
    ReuseDetected,
}

impl RevocationReason {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationReason::None => "None",
            RevocationReason::Replaced => "Replaced",
            RevocationReason::Manual => "Manual",
            RevocationReason::ReuseDetected => "ReuseDetected",
        }
    }
}

impl std::str::FromStr for RevocationReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(RevocationReason::None),
            "Replaced" => Ok(RevocationReason::Replaced),
            "Manual" => Ok(RevocationReason::Manual),
            "ReuseDetected" => Ok(RevocationReason::ReuseDetected),
            _ => Err(format!("Invalid revocation reason: {}", s)),
        }
    }
}

/// Lifecycle state of a refresh token, derived from its stored fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Active,
    /// Never stored; computed from `expires_at`
    Expired,
    Replaced,
    ManuallyRevoked,
    ReuseRevoked,
}

/// Refresh token record stored in the database
///
/// `token_hash` and `replaced_by_token` hold SHA-256 digests; the plaintext
/// token only ever exists on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: i32,

    /// Hashed token value
    pub token_hash: String,

    /// Client IP the token was issued to
    pub created_by_ip: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was revoked
    pub revoked_at: Option<DateTime<Utc>>,

    /// Client IP that caused the revocation
    pub revoked_by_ip: Option<String>,

    /// Why the token was revoked
    pub reason_revoked: RevocationReason,

    /// Hash of the successor token in the rotation chain
    pub replaced_by_token: Option<String>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Optimistic concurrency version, bumped by every successful update
    pub version: i64,
}

impl RefreshToken {
    /// Creates a new active refresh token
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owning user
    /// * `token_hash` - Digest of the plaintext token
    /// * `created_by_ip` - Client IP the token is issued to
    /// * `lifetime` - Refresh token lifetime
    pub fn new(
        user_id: i32,
        token_hash: String,
        created_by_ip: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_by_ip: created_by_ip.into(),
            created_at: now,
            expires_at: now + lifetime,
            revoked_at: None,
            revoked_by_ip: None,
            reason_revoked: RevocationReason::None,
            replaced_by_token: None,
            is_deleted: false,
            version: 0,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry as seen at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the refresh token has been revoked for any reason
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Not revoked and not expired
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Not revoked and not expired at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired_at(now)
    }

    /// Derived lifecycle state
    pub fn state(&self) -> TokenState {
        match self.reason_revoked {
            RevocationReason::Replaced => TokenState::Replaced,
            RevocationReason::Manual => TokenState::ManuallyRevoked,
            RevocationReason::ReuseDetected => TokenState::ReuseRevoked,
            RevocationReason::None if self.is_revoked() => TokenState::ManuallyRevoked,
            RevocationReason::None if self.is_expired() => TokenState::Expired,
            RevocationReason::None => TokenState::Active,
        }
    }

    /// Retires the token in favour of `successor_hash`
    pub fn mark_replaced(&mut self, ip: &str, successor_hash: &str) {
        self.revoked_at = Some(Utc::now());
        self.revoked_by_ip = Some(ip.to_string());
        self.reason_revoked = RevocationReason::Replaced;
        self.replaced_by_token = Some(successor_hash.to_string());
    }

    /// Revokes the token on request
    pub fn mark_revoked(&mut self, ip: &str) {
        self.revoked_at = Some(Utc::now());
        self.revoked_by_ip = Some(ip.to_string());
        self.reason_revoked = RevocationReason::Manual;
    }

    /// Marks the token as part of a replayed chain
    ///
    /// The original revocation timestamp is kept when there is one. The
    /// forward pointer is never touched.
    pub fn mark_reuse_detected(&mut self, ip: &str) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(Utc::now());
        }
        self.revoked_by_ip = Some(ip.to_string());
        self.reason_revoked = RevocationReason::ReuseDetected;
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Freshly issued refresh token: the stored record plus the plaintext value
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    /// Plaintext token handed to the client
    pub token: String,

    /// Stored record
    pub record: RefreshToken,
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_lifetime.num_seconds(),
            refresh_expires_in: refresh_lifetime.num_seconds(),
        }
    }
}

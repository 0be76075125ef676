//! User and auth models

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::response::Pagination;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_]+$").expect("valid username regex"));

/// Authenticated user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Points balance. Authoritative on the server; the client caches it and
    /// optimistically decrements on payment.
    pub points: Decimal,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    /// Name shown in the UI: nickname when set, else username
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }
}

/// Minimal user reference embedded in other payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

/// Token refresh result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    pub token: String,
}

/// Registration payload.
///
/// Validated client-side before any request is issued; the server applies
/// the same rules authoritatively.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 20, message = "username must be 3-20 characters"),
        regex(
            path = *USERNAME_RE,
            message = "username may only contain letters, digits and underscores"
        )
    )]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Form-only field, never sent on the wire
    #[serde(skip)]
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
}

/// Profile update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 30, message = "nickname must be at most 30 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// One points-ledger record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRecord {
    pub id: String,
    /// Signed change amount
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// Balance after this change
    #[serde(default)]
    pub balance_after: Option<Decimal>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Paginated points ledger payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsHistory {
    pub records: Vec<PointsRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(request("pixel_fan_1", "fan@example.com", "secret1", "secret1")
            .validate()
            .is_ok());
    }

    #[test]
    fn username_rules() {
        assert!(request("ab", "a@b.com", "secret1", "secret1").validate().is_err());
        assert!(request(&"x".repeat(21), "a@b.com", "secret1", "secret1")
            .validate()
            .is_err());
        assert!(request("bad name!", "a@b.com", "secret1", "secret1")
            .validate()
            .is_err());
    }

    #[test]
    fn email_and_password_rules() {
        assert!(request("player", "not-an-email", "secret1", "secret1")
            .validate()
            .is_err());
        assert!(request("player", "a@b.com", "short", "short").validate().is_err());
        assert!(request("player", "a@b.com", "secret1", "different")
            .validate()
            .is_err());
    }

    #[test]
    fn confirm_password_stays_local() {
        let json = serde_json::to_string(&request("player", "a@b.com", "secret1", "secret1")).unwrap();
        assert!(!json.contains("confirm"));
    }
}

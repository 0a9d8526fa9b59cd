//! Accounts: registration, profile, binding and verification codes.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::InvalidInputError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A user profile as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub wechat_openid: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: None,
            username: None,
            phone: None,
            email: None,
            wechat_openid: None,
            gender: None,
            birthday: None,
            avatar: None,
            created_at: None,
            updated_at: None,
            is_active: true,
        }
    }
}

impl User {
    /// A short label for display: username, then phone, then email.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.phone.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("(unnamed)")
    }
}

/// Response of `/api/auth/login`.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Default, Serialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    /// `male`, `female` or `other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl RegisterRequest {
    /// Apply the server's registration rules locally.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.phone.is_none() && self.email.is_none() {
            return Err(InvalidInputError::field(
                "phone/email",
                "a phone number or an email address is required",
            ));
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(InvalidInputError::field(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        validate_profile(self.gender.as_deref(), self.birthday.as_deref())
    }

    /// Credentials for logging in right after registering.
    ///
    /// The phone number is used when both are present, which is the order
    /// the server checks them in.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(phone) = &self.phone {
            return Some(Credentials::phone(phone, &self.password));
        }
        self.email
            .as_ref()
            .map(|email| Credentials::email(email, &self.password))
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("gender", &self.gender)
            .field("birthday", &self.birthday)
            .finish()
    }
}

/// Body of `PUT /api/auth/me`. Only set fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.gender.is_none()
            && self.birthday.is_none()
            && self.avatar.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.is_empty() {
            return Err(InvalidInputError::field("update", "no fields to change"));
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_profile(self.gender.as_deref(), self.birthday.as_deref())
    }
}

/// Body of `POST /api/auth/bind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
}

impl BindRequest {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.phone.is_none() && self.email.is_none() && self.wechat_openid.is_none() {
            return Err(InvalidInputError::field(
                "bind",
                "a phone number, email address or WeChat OpenID is required",
            ));
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Where a one-time verification code is delivered.
///
/// The caller picks the channel; nothing is inferred from which contact
/// details the account has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationChannel {
    Phone(String),
    Email(String),
}

impl VerificationChannel {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        match self {
            VerificationChannel::Phone(phone) => validate_phone(phone),
            VerificationChannel::Email(email) => validate_email(email),
        }
    }

    /// Query parameters of `POST /api/auth/send-verification-code`.
    pub fn query(&self) -> VerificationQuery<'_> {
        match self {
            VerificationChannel::Phone(phone) => VerificationQuery {
                phone: Some(phone),
                email: None,
            },
            VerificationChannel::Email(email) => VerificationQuery {
                phone: None,
                email: Some(email),
            },
        }
    }
}

/// Query parameters selecting the verification channel.
#[derive(Debug, Serialize)]
pub struct VerificationQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

/// Response of `POST /api/auth/send-verification-code`.
///
/// Development servers echo the code back; production servers do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCodeResponse {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Mainland mobile number: 11 digits, `1` then `3`-`9`.
pub fn validate_phone(phone: &str) -> Result<(), InvalidInputError> {
    let bytes = phone.as_bytes();
    let valid = bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1]);

    if valid {
        Ok(())
    } else {
        Err(InvalidInputError::field(
            "phone",
            format!("'{}' is not a valid mobile number", phone),
        ))
    }
}

/// A plain `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> Result<(), InvalidInputError> {
    let invalid = || {
        InvalidInputError::field("email", format!("'{}' is not a valid email address", email))
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

fn validate_profile(gender: Option<&str>, birthday: Option<&str>) -> Result<(), InvalidInputError> {
    if let Some(gender) = gender
        && !matches!(gender, "male" | "female" | "other")
    {
        return Err(InvalidInputError::field(
            "gender",
            "must be one of male, female, other",
        ));
    }
    if let Some(birthday) = birthday
        && NaiveDate::parse_from_str(birthday, "%Y-%m-%d").is_err()
    {
        return Err(InvalidInputError::field("birthday", "must be YYYY-MM-DD"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register(phone: Option<&str>, email: Option<&str>, password: &str) -> RegisterRequest {
        RegisterRequest {
            phone: phone.map(String::from),
            email: email.map(String::from),
            password: password.to_string(),
            ..RegisterRequest::default()
        }
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("13800138000").is_ok());
        assert!(validate_phone("19912345678").is_ok());
        assert!(validate_phone("12800138000").is_err());
        assert!(validate_phone("1380013800").is_err());
        assert!(validate_phone("1380013800a").is_err());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("runner@example.com").is_ok());
        assert!(validate_email("runner@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
        assert!(validate_email("run ner@example.com").is_err());
    }

    #[test]
    fn register_requires_a_contact() {
        assert!(register(None, None, "secret1").validate().is_err());
        assert!(register(Some("13800138000"), None, "secret1").validate().is_ok());
        assert!(register(None, Some("a@example.com"), "secret1").validate().is_ok());
    }

    #[test]
    fn register_enforces_password_length() {
        let err = register(Some("13800138000"), None, "12345")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }

    #[test]
    fn register_checks_profile_fields() {
        let mut request = register(Some("13800138000"), None, "secret1");
        request.birthday = Some("1990/01/01".to_string());
        assert!(request.validate().is_err());

        request.birthday = Some("1990-01-01".to_string());
        request.gender = Some("robot".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_body_omits_unset_fields() {
        let body = serde_json::to_value(register(None, Some("a@example.com"), "secret1")).unwrap();
        assert_eq!(body, json!({"email": "a@example.com", "password": "secret1"}));
    }

    #[test]
    fn register_login_prefers_phone() {
        let request = register(Some("13800138000"), Some("a@example.com"), "secret1");
        let creds = request.credentials().unwrap();
        assert_eq!(creds.identifier().value(), "13800138000");
    }

    #[test]
    fn register_debug_hides_password() {
        let debug = format!("{:?}", register(Some("13800138000"), None, "hunter22"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn token_response_defaults() {
        let token: TokenResponse = serde_json::from_value(json!({"access_token": "T"})).unwrap();
        assert_eq!(token.access_token, "T");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
        assert!(!format!("{:?}", token).contains("\"T\""));
    }

    #[test]
    fn user_defaults_to_active() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "phone": "13800138000",
            "created_at": "2024-06-01T08:00:00"
        }))
        .unwrap();
        assert!(user.is_active);
        assert!(user.created_at.is_some());
        assert_eq!(user.display_name(), "13800138000");
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(UserUpdate::default().validate().is_err());
        let update = UserUpdate {
            username: Some("pacer".to_string()),
            ..UserUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn bind_requires_an_account() {
        assert!(BindRequest::default().validate().is_err());
        let bind = BindRequest {
            wechat_openid: Some("oAbc".to_string()),
            ..BindRequest::default()
        };
        assert!(bind.validate().is_ok());
    }

    #[test]
    fn verification_channel_selects_one_parameter() {
        let channel = VerificationChannel::Email("a@example.com".to_string());
        assert_eq!(
            serde_json::to_value(channel.query()).unwrap(),
            json!({"email": "a@example.com"})
        );
    }
}

//! Login credentials type.

use std::fmt;

use serde::Serialize;

use crate::error::InvalidInputError;

/// The account identifier used to log in.
///
/// Exactly one identifier is sent per login, so there is no precedence to
/// decide between phone and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// Mobile phone number.
    Phone(String),
    /// Email address.
    Email(String),
    /// WeChat OpenID from the mini-program login flow. No password needed.
    WechatOpenId(String),
}

impl LoginIdentifier {
    /// Returns the identifier value.
    pub fn value(&self) -> &str {
        match self {
            LoginIdentifier::Phone(v)
            | LoginIdentifier::Email(v)
            | LoginIdentifier::WechatOpenId(v) => v,
        }
    }

    /// Name of the identifier type, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            LoginIdentifier::Phone(_) => "phone",
            LoginIdentifier::Email(_) => "email",
            LoginIdentifier::WechatOpenId(_) => "wechat_openid",
        }
    }
}

/// Login credentials for the running-analysis backend.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use paceline_core::Credentials;
///
/// let creds = Credentials::phone("13800138000", "secret123");
/// assert_eq!(creds.identifier().value(), "13800138000");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: LoginIdentifier,
    password: Option<String>,
}

impl Credentials {
    /// Credentials for a phone number and password.
    pub fn phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: LoginIdentifier::Phone(phone.into()),
            password: Some(password.into()),
        }
    }

    /// Credentials for an email address and password.
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: LoginIdentifier::Email(email.into()),
            password: Some(password.into()),
        }
    }

    /// Credentials for a WeChat OpenID.
    pub fn wechat(openid: impl Into<String>) -> Self {
        Self {
            identifier: LoginIdentifier::WechatOpenId(openid.into()),
            password: None,
        }
    }

    /// Returns the identifier.
    pub fn identifier(&self) -> &LoginIdentifier {
        &self.identifier
    }

    /// Check the credentials before they are sent.
    ///
    /// Only presence is checked. The server matches phone and email
    /// verbatim at login, so their formats are enforced at registration.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let (field, value) = match &self.identifier {
            LoginIdentifier::Phone(v) => ("phone", v),
            LoginIdentifier::Email(v) => ("email", v),
            LoginIdentifier::WechatOpenId(v) => ("wechat_openid", v),
        };
        if value.trim().is_empty() {
            return Err(InvalidInputError::field(field, "must not be empty"));
        }
        if matches!(self.identifier, LoginIdentifier::WechatOpenId(_)) {
            return Ok(());
        }
        match self.password.as_deref() {
            Some(p) if !p.is_empty() => Ok(()),
            _ => Err(InvalidInputError::field("password", "required")),
        }
    }

    /// Returns the JSON body for `/api/auth/login`.
    ///
    /// # Security
    ///
    /// The returned value carries the password. Never log it.
    pub fn to_request(&self) -> LoginRequest<'_> {
        let mut request = LoginRequest {
            phone: None,
            email: None,
            wechat_openid: None,
            password: self.password.as_deref(),
        };
        match &self.identifier {
            LoginIdentifier::Phone(v) => request.phone = Some(v),
            LoginIdentifier::Email(v) => request.email = Some(v),
            LoginIdentifier::WechatOpenId(v) => request.wechat_openid = Some(v),
        }
        request
    }
}

/// Request body for `/api/auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_openid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("wechat_openid", &self.wechat_openid)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

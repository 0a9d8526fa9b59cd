//! Account endpoints under `/api/auth`.

use tracing::{debug, instrument};

use paceline_core::error::InvalidInputError;
use paceline_core::model::{
    BindRequest, RegisterRequest, TokenResponse, User, UserUpdate, VerificationChannel,
    VerificationCodeResponse,
};
use paceline_core::{BearerToken, Credentials, Result};

use crate::ApiClient;

/// Registration, login and profile calls.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Does not log in.
    #[instrument(skip(self))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        request.validate()?;
        self.client.post(&["api", "auth", "register"], request).await
    }

    /// Exchange credentials for a token and enter the logged-in state.
    ///
    /// The token is persisted before this returns; if the store cannot be
    /// written the call fails and the session stays as it was.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        credentials.validate()?;

        let response: TokenResponse = self
            .client
            .post(&["api", "auth", "login"], &credentials.to_request())
            .await?;

        self.client
            .session()
            .login(BearerToken::new(response.access_token.clone()))?;
        debug!(identifier = credentials.identifier().kind(), "Login accepted");

        Ok(response)
    }

    /// Register, then log in with the same phone or email and password.
    #[instrument(skip(self))]
    pub async fn register_and_login(
        &self,
        request: &RegisterRequest,
    ) -> Result<(User, TokenResponse)> {
        let credentials = request.credentials().ok_or_else(|| {
            InvalidInputError::Field {
                field: "phone/email",
                reason: "a phone number or an email address is required".to_string(),
            }
        })?;

        let user = self.register(request).await?;
        let token = self.login(&credentials).await?;
        self.client.session().set_user_info(user.clone());
        Ok((user, token))
    }

    /// Fetch the logged-in user and remember it in the session.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        let user: User = self.client.get(&["api", "auth", "me"], &()).await?;
        self.client.session().set_user_info(user.clone());
        Ok(user)
    }

    /// Change profile fields of the logged-in user.
    #[instrument(skip(self))]
    pub async fn update_me(&self, update: &UserUpdate) -> Result<User> {
        update.validate()?;
        let user: User = self.client.put(&["api", "auth", "me"], update).await?;
        self.client.session().set_user_info(user.clone());
        Ok(user)
    }

    /// Attach a phone number, email address or WeChat OpenID to the account.
    #[instrument(skip(self))]
    pub async fn bind(&self, request: &BindRequest) -> Result<User> {
        request.validate()?;
        let user: User = self.client.post(&["api", "auth", "bind"], request).await?;
        self.client.session().set_user_info(user.clone());
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn send_verification_code(
        &self,
        channel: &VerificationChannel,
    ) -> Result<VerificationCodeResponse> {
        channel.validate()?;
        self.client
            .post_query(&["api", "auth", "send-verification-code"], &channel.query())
            .await
    }

    /// End the session locally. The server keeps no session state.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.client.session().logout()
    }
}

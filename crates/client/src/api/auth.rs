//! Login, logout and the current user.

use filmbudget_shared::{LoginRequest, TokenPair, UserInfo};
use serde::Deserialize;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Login response: a token pair, optionally with the user.
#[derive(Deserialize)]
struct LoginResponse {
    #[serde(flatten)]
    tokens: TokenPair,
    #[serde(default)]
    user: Option<UserInfo>,
}

impl ApiClient {
    /// Logs in and authenticates the session.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with `AppError::Unauthorized` for bad
    /// credentials.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserInfo> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_anonymous("/auth/login", &request).await?;

        self.cache().clear_all();
        self.session().authenticate(response.tokens)?;

        let user = match response.user {
            Some(user) => user,
            None => self.me().await?,
        };
        info!(user_id = %user.id, "Logged in");
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Forgets the tokens locally.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Session` if the token store cannot be wiped.
    pub fn logout(&self) -> ClientResult<()> {
        self.cache().clear_all();
        self.session().clear()?;
        Ok(())
    }

    /// The signed-in user.
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/auth/me").await
    }
}

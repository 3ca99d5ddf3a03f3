//! Login Use Case
//!
//! Exchanges email + password for a bearer token.

use std::sync::Arc;

use kernel::email::Email;
use kernel::id::UserId;
use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    pub user_id: UserId,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if input.email.trim().is_empty() {
            return Err(AuthError::validation("email", "must not be empty"));
        }
        if input.password.is_empty() {
            return Err(AuthError::validation("password", "must not be empty"));
        }

        // A string that is not an email cannot belong to any account
        let email = Email::new(&input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id.to_string())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            token,
            user_id: user.id,
        })
    }
}

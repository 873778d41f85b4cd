//! # Session service: registration, login and credential checks
//!
//! [`SessionService`] owns the account store and the [`TokenSigner`]. It never
//! touches HTTP: the route layer hands it plain strings and turns its results
//! into status codes and cookies. The credential cookie itself is described by
//! [`session_cookie`] / [`removal_cookie`].

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use tokio::sync::OnceCell;
use store::{AccountInfo, AccountStore, NewAccount};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::token::TokenSigner;
use crate::error::ApiError;

/// Name of the cookie carrying the session credential.
pub const TOKEN_COOKIE: &str = "token";

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Cookie that hands a freshly issued credential to the browser.
pub fn session_cookie(token: String, signer: &TokenSigner, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::seconds(signer.ttl().num_seconds());
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Expired, empty cookie matching [`session_cookie`]'s name and path.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// Lowercased, trimmed email used for every lookup and insert.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct SessionService {
    accounts: Arc<dyn AccountStore>,
    signer: TokenSigner,
    /// Verified against when the email is unknown, so both login failures cost one Argon2 run.
    dummy_hash: OnceCell<String>,
}

impl SessionService {
    pub fn new(accounts: Arc<dyn AccountStore>, signer: TokenSigner) -> Self {
        Self {
            accounts,
            signer,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Create an account. The password is hashed before it reaches the store.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountInfo, ApiError> {
        let username = username.trim().to_string();
        let email = normalize_email(email);

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("All fields are required"));
        }

        if self.accounts.find_account_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let account = self
            .accounts
            .insert_account(NewAccount {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, "registered account");
        Ok(account.to_info())
    }

    /// Check credentials and issue a signed session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let email = normalize_email(email);

        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Email and password required"));
        }

        let Some(account) = self.accounts.find_account_by_email(&email).await? else {
            let dummy = self.dummy_hash().await?.clone();
            self.check_password(password, dummy).await?;
            tracing::debug!("login for unknown email");
            return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
        };

        let valid = self
            .check_password(password, account.password_hash.clone())
            .await?;

        if !valid {
            tracing::info!(account_id = %account.id, "login rejected: wrong password");
            return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.signer.issue(account.id).map_err(ApiError::internal)?;
        tracing::info!(account_id = %account.id, "login succeeded");
        Ok(token)
    }

    async fn check_password(&self, password: &str, hash: String) -> Result<bool, ApiError> {
        let password = password.to_string();
        Ok(tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??)
    }

    async fn dummy_hash(&self) -> Result<&String, ApiError> {
        self.dummy_hash
            .get_or_try_init(|| async {
                let hash =
                    tokio::task::spawn_blocking(|| hash_password("unused-login-password")).await??;
                Ok::<_, ApiError>(hash)
            })
            .await
    }

    /// Resolve the caller's account id from the raw cookie value.
    ///
    /// No credential is an [`ApiError::Auth`]; a credential that fails signature or
    /// expiry checks is an [`ApiError::Forbidden`].
    pub fn authenticate(&self, token: Option<&str>) -> Result<Uuid, ApiError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Auth("Unauthorized: No token provided".to_string()))?;
        let claims = self.signer.verify(token)?;
        Ok(claims.sub)
    }

    /// Public view of the authenticated caller.
    pub async fn me(&self, account_id: Uuid) -> Result<AccountInfo, ApiError> {
        self.accounts
            .find_account_by_id(account_id)
            .await?
            .map(|a| a.to_info())
            .ok_or_else(|| ApiError::Auth("Unauthorized: Unknown account".to_string()))
    }
}

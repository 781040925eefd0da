//! Session store
//!
//! Holds who is signed in, keeps that in durable storage and owns the
//! service layer so the bearer token always matches the session.

use shared::client::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UserInfo, UserUpdate,
};
use shared::error::ErrorCode;
use shared::models::Role;

use crate::guard::RoleSet;
use crate::storage::{KeyValueStorage, StorageError, TOKEN_KEY, USER_KEY};
use crate::{ClientError, ClientResult, HotelApi, HttpClient, validation};

/// Current identity
///
/// User and token are held together, so a session is authenticated exactly
/// when both are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    auth: Option<(UserInfo, String)>,
    is_loading: bool,
}

impl Session {
    /// Startup state, before [`SessionStore::restore`] ran
    pub fn loading() -> Self {
        Self {
            auth: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            auth: None,
            is_loading: false,
        }
    }

    pub fn authenticated(user: UserInfo, token: String) -> Self {
        Self {
            auth: Some((user, token)),
            is_loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.auth.as_ref().map(|(user, _)| user)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|(_, token)| token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// True iff signed in with one of `roles`
    ///
    /// Unlike the guard, an empty set matches nothing here.
    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        let roles = roles.into();
        self.role().is_some_and(|r| roles.contains(r))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Why a sign-in did not happen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: String,
    pub code: ErrorCode,
}

impl From<ClientError> for LoginFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => Self {
                message: ErrorCode::InvalidCredentials.message().to_string(),
                code: ErrorCode::InvalidCredentials,
            },
            other => Self {
                message: other.user_message(),
                code: other.code(),
            },
        }
    }
}

/// Owner of the session, its persistence and the authenticated API
pub struct SessionStore<H, S> {
    api: HotelApi<H>,
    storage: S,
    session: Session,
}

impl<H: HttpClient, S: KeyValueStorage> SessionStore<H, S> {
    pub fn new(http: H, storage: S) -> Self {
        Self {
            api: HotelApi::new(http),
            storage,
            session: Session::loading(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &HotelApi<H> {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        self.session.has_role(roles)
    }

    /// Rebuild the session from durable storage
    ///
    /// A malformed user or token entry is removed and leaves the session
    /// signed out. Storage failures count as "nothing stored".
    pub fn restore(&mut self) -> &Session {
        let token = self.read_entry(TOKEN_KEY);
        let user = self.read_entry(USER_KEY);

        let parsed_user = user
            .as_deref()
            .map(serde_json::from_str::<UserInfo>)
            .transpose();
        let token = token.filter(|t| !t.trim().is_empty());

        match (parsed_user, token) {
            (Ok(Some(user)), Some(token)) => {
                tracing::info!(user_id = user.id, role = %user.role, "Session restored");
                self.api.set_token(Some(token.clone()));
                self.session = Session::authenticated(user, token);
            }
            (parsed_user, token) => {
                if let Err(e) = &parsed_user {
                    tracing::warn!(error = %e, "Stored user is malformed, clearing session");
                }
                if parsed_user.is_err() || user.is_some() != token.is_some() {
                    self.clear_storage();
                }
                self.api.set_token(None);
                self.session = Session::signed_out();
            }
        }
        &self.session
    }

    /// Validate the form, then `POST /auth/login`
    pub async fn login(&mut self, request: LoginRequest) -> Result<UserInfo, LoginFailure> {
        validation::validate_login(&request).map_err(ClientError::from)?;
        let response = self.api.login(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            LoginFailure::from(e)
        })?;
        Ok(self.establish(response))
    }

    /// `POST /auth/register`, then sign in with the returned session
    pub async fn register(&mut self, request: RegisterRequest) -> Result<UserInfo, LoginFailure> {
        validation::validate_email(&request.email).map_err(ClientError::from)?;
        validation::validate_password(&request.password).map_err(ClientError::from)?;
        validation::validate_name(&request.first_name, "first_name", "First name")
            .map_err(ClientError::from)?;
        validation::validate_name(&request.last_name, "last_name", "Last name")
            .map_err(ClientError::from)?;
        let response = self.api.register(&request).await.map_err(LoginFailure::from)?;
        Ok(self.establish(response))
    }

    fn establish(&mut self, response: LoginResponse) -> UserInfo {
        let LoginResponse { token, user } = response;
        if let Err(e) = self.persist(&token, &user) {
            tracing::warn!(error = %e, "Session could not be persisted");
        }
        tracing::info!(user_id = user.id, role = %user.role, "Signed in");
        self.api.set_token(Some(token.clone()));
        self.session = Session::authenticated(user.clone(), token);
        user
    }

    /// Best-effort `POST /auth/logout`, then forget the session locally
    pub async fn logout(&mut self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!(error = %e, "Logout request failed, signing out locally");
            }
        }
        self.sign_out_locally();
        tracing::info!("Signed out");
    }

    /// Merge `update` into the current user and persist it
    pub fn update_user(&mut self, update: UserUpdate) -> ClientResult<&UserInfo> {
        let Some((current, _)) = self.session.auth.as_ref() else {
            return Err(ClientError::InvalidState("Not signed in".to_string()));
        };
        let mut merged = current.clone();
        merged.merge(update);
        let json = serde_json::to_string(&merged)?;
        self.storage.set(USER_KEY, &json)?;

        let Some((user, _)) = self.session.auth.as_mut() else {
            return Err(ClientError::InvalidState("Not signed in".to_string()));
        };
        *user = merged;
        Ok(&*user)
    }

    /// `PUT /auth/profile`, then adopt the server's copy of the user
    pub async fn update_profile(&mut self, update: UserUpdate) -> ClientResult<&UserInfo> {
        let result = self.api.update_profile(&update).await;
        let server_user = self.intercept(result)?;
        self.update_user(UserUpdate {
            first_name: Some(server_user.first_name),
            last_name: Some(server_user.last_name),
            email: Some(server_user.email),
            username: server_user.username,
            phone: server_user.phone,
        })
    }

    /// Check strength locally, then `POST /auth/change-password`
    pub async fn change_password(&mut self, request: ChangePasswordRequest) -> ClientResult<()> {
        validation::validate_password(&request.new_password)?;
        let result = self.api.change_password(&request).await;
        self.intercept(result)
    }

    /// Pass a service result through, ending the session on a 401
    pub fn intercept<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            if e.is_unauthorized() && self.session.is_authenticated() {
                tracing::info!("Token rejected by backend, signing out");
                self.sign_out_locally();
            }
        }
        result
    }

    fn sign_out_locally(&mut self) {
        self.clear_storage();
        self.api.set_token(None);
        self.session = Session::signed_out();
    }

    fn persist(&mut self, token: &str, user: &UserInfo) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &json)?;
        Ok(())
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session entry");
                None
            }
        }
    }

    fn clear_storage(&mut self) {
        if let Err(e) = self.storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }
}

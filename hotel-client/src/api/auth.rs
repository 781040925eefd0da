//! Auth endpoints

use serde::Deserialize;
use shared::client::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    UserInfo, UserUpdate,
};
use shared::response::ApiResponse;

use super::{HotelApi, into_data, into_unit};
use crate::{ClientResult, HttpClient};

/// The backend answers login either wrapped or bare
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginEnvelope {
    Direct(LoginResponse),
    Wrapped(ApiResponse<LoginResponse>),
}

impl LoginEnvelope {
    fn into_login(self) -> ClientResult<LoginResponse> {
        match self {
            LoginEnvelope::Direct(login) => Ok(login),
            LoginEnvelope::Wrapped(resp) => into_data(resp, "login"),
        }
    }
}

impl<H: HttpClient> HotelApi<H> {
    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.http
            .post::<LoginEnvelope, _>("auth/login", request)
            .await?
            .into_login()
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<LoginResponse> {
        self.http
            .post::<LoginEnvelope, _>("auth/register", request)
            .await?
            .into_login()
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> ClientResult<()> {
        into_unit(self.http.post_empty("auth/logout").await?)
    }

    /// `GET /auth/profile`
    pub async fn profile(&self) -> ClientResult<UserInfo> {
        let resp: ApiResponse<ProfileResponse> = self.http.get("auth/profile").await?;
        Ok(into_data(resp, "profile")?.user)
    }

    /// `PUT /auth/profile`
    pub async fn update_profile(&self, update: &UserUpdate) -> ClientResult<UserInfo> {
        let resp: ApiResponse<ProfileResponse> = self.http.put("auth/profile", update).await?;
        Ok(into_data(resp, "profile")?.user)
    }

    /// `POST /auth/change-password`
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        into_unit(self.http.post("auth/change-password", request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_envelope_accepts_both_shapes() {
        let wrapped = r#"{"success": true, "data": {"token": "t", "user": {"id": 1, "role": "admin", "email": "a@b.c"}}}"#;
        let direct = r#"{"token": "t", "user": {"id": 1, "role": "admin", "email": "a@b.c"}}"#;

        for body in [wrapped, direct] {
            let env: LoginEnvelope = serde_json::from_str(body).unwrap();
            let login = env.into_login().unwrap();
            assert_eq!(login.token, "t");
            assert_eq!(login.user.role, shared::models::Role::Admin);
        }
    }

    #[test]
    fn test_login_envelope_failure_flag() {
        let body = r#"{"success": false, "message": "Invalid credentials"}"#;
        let env: LoginEnvelope = serde_json::from_str(body).unwrap();
        let err = env.into_login().unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
    }
}

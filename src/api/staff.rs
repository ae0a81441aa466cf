use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiResponse, HttpClient};
use crate::auth::session::{SessionStore, StaffUser};
use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

/// Successful login body: `{ "token": ..., "user": {...} }`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: StaffUser,
}

pub async fn login(http: &HttpClient, req: &LoginRequest) -> AppResult<ApiResponse> {
    http.post("/staff/login/", req).await
}

/// Log in and, on success, persist the issued identity and token.
///
/// Rejected credentials are not an error: the envelope is returned with the
/// backend's status and the session is left untouched.
pub async fn sign_in<S: KeyValueStore>(
    http: &HttpClient,
    session: &SessionStore<S>,
    req: &LoginRequest,
) -> AppResult<ApiResponse> {
    let resp = login(http, req).await?;
    if resp.is_success() {
        let body: LoginResponse = resp.parse()?;
        session.set_session(&body.user, &body.token)?;
    } else {
        tracing::info!(status = resp.status, account = %req.account, "Login rejected");
    }
    Ok(resp)
}

pub fn parse_login(resp: &ApiResponse) -> AppResult<LoginResponse> {
    if !resp.is_success() {
        return Err(AppError::Unauthorized(
            resp.detail().unwrap_or("login rejected").to_string(),
        ));
    }
    resp.parse()
}

pub async fn reset_password(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.put("/staff/reset/", body).await
}

pub async fn list(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/staff/allstaff/").await
}

pub async fn create(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/staff/create/", body).await
}

pub async fn update(http: &HttpClient, uid: &str, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/staff/update/{}/", uid), body).await
}

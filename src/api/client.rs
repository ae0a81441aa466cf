use serde::Serialize;
use serde_json::Value;

use super::{ApiResponse, HttpClient};
use crate::error::AppResult;

pub async fn list<Q: Serialize + ?Sized>(http: &HttpClient, page: u32, query: &Q) -> AppResult<ApiResponse> {
    http.get_page("/client/", page, query).await
}

/// Clients whose follow-up is due today or overdue.
pub async fn overdue<Q: Serialize + ?Sized>(http: &HttpClient, query: &Q) -> AppResult<ApiResponse> {
    http.get_with("/client/overdue/", query).await
}

pub async fn create(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/client/", body).await
}

pub async fn detail(http: &HttpClient, uid: &str) -> AppResult<ApiResponse> {
    http.get(&format!("/client/{}/", uid)).await
}

pub async fn update(http: &HttpClient, uid: &str, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/client/{}/", uid), body).await
}

pub async fn follow(http: &HttpClient, uid: &str, body: &Value) -> AppResult<ApiResponse> {
    http.post(&format!("/client/{}/follow/", uid), body).await
}

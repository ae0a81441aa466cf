use serde_json::Value;

use super::{ApiResponse, HttpClient};
use crate::error::AppResult;

pub async fn list(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/installer/").await
}

pub async fn create(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/installer/", body).await
}

pub async fn detail(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.get(&format!("/installer/{}/", id)).await
}

pub async fn update(http: &HttpClient, id: u64, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/installer/{}/", id), body).await
}

pub async fn delete(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.delete(&format!("/installer/{}/", id)).await
}

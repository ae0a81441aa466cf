use serde::Serialize;
use serde_json::Value;

use super::{ApiResponse, HttpClient};
use crate::error::AppResult;

pub async fn create(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/order/create/", body).await
}

pub async fn list<Q: Serialize + ?Sized>(http: &HttpClient, page: u32, query: &Q) -> AppResult<ApiResponse> {
    http.get_page("/orders/", page, query).await
}

pub async fn detail(http: &HttpClient, order_id: &str) -> AppResult<ApiResponse> {
    http.get(&format!("/orders/{}/", order_id)).await
}

/// Line items across orders, filtered by `query`.
pub async fn details<Q: Serialize + ?Sized>(http: &HttpClient, query: &Q) -> AppResult<ApiResponse> {
    http.get_with("/order-details/", query).await
}

pub async fn pay_balance(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/balance-payments/", body).await
}

/// Ship every item of an order to installation in one step.
pub async fn install(http: &HttpClient, order_id: &str, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/order-install/{}/", order_id), body).await
}

pub async fn operation_logs<Q: Serialize + ?Sized>(http: &HttpClient, query: &Q) -> AppResult<ApiResponse> {
    http.get_with("/operation-logs/", query).await
}

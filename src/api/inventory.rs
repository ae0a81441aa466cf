//! Stock, purchasing (outbound) and receiving endpoints.

use serde::Serialize;
use serde_json::Value;

use super::{ApiResponse, HttpClient};
use crate::error::{AppError, AppResult};

/// Pull the record id out of an update payload.
pub(crate) fn record_id(body: &Value) -> AppResult<String> {
    match body.get("id") {
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(AppError::Validation("Payload must carry an id".to_string())),
    }
}

pub async fn create(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/inventory/", body).await
}

pub async fn list<Q: Serialize + ?Sized>(http: &HttpClient, page: u32, query: &Q) -> AppResult<ApiResponse> {
    http.get_page("/inventory/", page, query).await
}

pub async fn update(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    let id = record_id(body)?;
    http.put(&format!("/inventory/{}/", id), body).await
}

/// Every item of one brand, unpaged, for the purchase/receive forms.
pub async fn all_for_brand(http: &HttpClient, brand_id: i64) -> AppResult<ApiResponse> {
    if brand_id < 1 {
        return Err(AppError::Validation(format!("Invalid brand id: {}", brand_id)));
    }
    http.get_with("/allinventory/", &[("brand_id", brand_id)]).await
}

pub async fn create_purchase(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/purchase/", body).await
}

pub async fn purchase_list(http: &HttpClient, page: u32) -> AppResult<ApiResponse> {
    http.get_page("/purchase/list/", page, &()).await
}

pub async fn purchase_detail(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.get(&format!("/purchase/detail/{}", id)).await
}

pub async fn create_receive(http: &HttpClient, body: &Value) -> AppResult<ApiResponse> {
    http.post("/receive/", body).await
}

pub async fn receive_list(http: &HttpClient, page: u32) -> AppResult<ApiResponse> {
    http.get_page("/receive/list/", page, &()).await
}

pub async fn receive_detail(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.get(&format!("/receive/detail/{}", id)).await
}

pub async fn update_purchase_detail(http: &HttpClient, id: u64, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/purchase/detail/update/{}/", id), body).await
}

pub async fn update_receive_detail(http: &HttpClient, id: u64, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/receive/detail/update/{}/", id), body).await
}

pub async fn delete_purchase_detail(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.delete(&format!("/purchase/detail/delete/{}/", id)).await
}

pub async fn delete_receive_detail(http: &HttpClient, id: u64) -> AppResult<ApiResponse> {
    http.delete(&format!("/receive/detail/delete/{}/", id)).await
}

/// Spreadsheet export of the current stock.
pub async fn download(http: &HttpClient) -> AppResult<ApiResponse<Vec<u8>>> {
    http.download("/download/").await
}

pub async fn log(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/log/").await
}

pub async fn update_purchase_cost(http: &HttpClient, id: u64, body: &Value) -> AppResult<ApiResponse> {
    http.put(&format!("/purchase/cost/update/{}/", id), body).await
}

//! Dashboard figures shown on the home screen.

use super::{ApiResponse, HttpClient};
use crate::error::AppResult;

/// Total stock value per brand.
pub async fn inventory_by_brand(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/inventory-by-brand/").await
}

/// Sales per staff member for the current month.
pub async fn staff_performance(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/staff-performance/").await
}

/// Monthly sales, January to December of the current year.
pub async fn current_year_sales(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/current-year-sales/").await
}

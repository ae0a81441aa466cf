//! Brand and category dictionaries.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::inventory::record_id;
use super::{ApiResponse, HttpClient};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogModel {
    Brand,
    Category,
}

impl CatalogModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogModel::Brand => "brand",
            CatalogModel::Category => "category",
        }
    }
}

impl fmt::Display for CatalogModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(CatalogModel::Brand),
            "category" => Ok(CatalogModel::Category),
            _ => Err(AppError::Validation(format!(
                "Unknown catalog model: {}. Must be one of: brand, category",
                s
            ))),
        }
    }
}

pub async fn brands(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/brand/").await
}

pub async fn categories(http: &HttpClient) -> AppResult<ApiResponse> {
    http.get("/category/").await
}

pub async fn create(http: &HttpClient, model: CatalogModel, body: &Value) -> AppResult<ApiResponse> {
    http.post(&format!("/{}/", model), body).await
}

pub async fn edit(http: &HttpClient, model: CatalogModel, body: &Value) -> AppResult<ApiResponse> {
    let id = record_id(body)?;
    http.put(&format!("/{}/{}/", model, id), body).await
}

pub async fn delete(http: &HttpClient, model: CatalogModel, id: u64) -> AppResult<ApiResponse> {
    http.delete(&format!("/{}/{}/", model, id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse() {
        assert_eq!("brand".parse::<CatalogModel>().unwrap(), CatalogModel::Brand);
        assert_eq!("category".parse::<CatalogModel>().unwrap(), CatalogModel::Category);
        assert!(matches!("supplier".parse::<CatalogModel>(), Err(AppError::Validation(_))));
    }
}

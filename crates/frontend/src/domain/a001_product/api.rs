use contracts::domain::a001_product::Product;
use contracts::domain::common::{ApiEnvelope, ListMetadata};
use gloo_net::http::Request;
use serde::Serialize;

use crate::shared::api_utils::{api_url, Fetched};
use crate::shared::fallback::fallback_products;
use crate::shared::fetch_cache::FetchCache;

const API_PATH: &str = "/api/products";

/// Query-параметры списка товаров. Ключи зеркалят критерии фильтров,
/// чтобы ссылку на отфильтрованный список можно было отдать бэкенду.
/// Пагинация и сортировка клиентские и в query не попадают.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductListQuery {
    /// Путь запроса с query string (он же ключ кэша).
    pub fn to_path(&self) -> String {
        match serde_qs::to_string(self) {
            Ok(qs) if !qs.is_empty() => format!("{}?{}", API_PATH, qs),
            _ => API_PATH.to_string(),
        }
    }
}

/// Результат списка: товары плюс серверные метаданные пагинации.
pub type ProductPage = (Vec<Product>, Option<ListMetadata>);

/// Загрузка списка товаров.
///
/// Порядок: живой кэш (если не force) -> сеть -> протухший кэш ->
/// placeholder-набор. Наружу всегда возвращаются данные; деградация
/// видна по `source`.
pub async fn fetch_products(
    cache: &FetchCache,
    query: &ProductListQuery,
    force_refresh: bool,
) -> Fetched<ProductPage> {
    let path = query.to_path();

    if !force_refresh {
        if let Some(value) = cache.get(&path) {
            if let Ok(products) = serde_json::from_value::<Vec<Product>>(value) {
                return Fetched::live((products, None));
            }
        }
    }

    match request_products(&path).await {
        Ok(envelope) => {
            if let Ok(value) = serde_json::to_value(&envelope.data) {
                cache.put(&path, value);
            }
            Fetched::live((envelope.data, envelope.metadata))
        }
        Err(err) => {
            log::warn!("Список товаров недоступен: {}", err);
            if let Some(value) = cache.get_stale(&path) {
                if let Ok(products) = serde_json::from_value::<Vec<Product>>(value) {
                    return Fetched::cached((products, None));
                }
            }
            Fetched::fallback((fallback_products(), None))
        }
    }
}

async fn request_products(path: &str) -> Result<ApiEnvelope<Vec<Product>>, String> {
    let response = Request::get(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("запрос не прошёл: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<Vec<Product>> = response
        .json()
        .await
        .map_err(|e| format!("не удалось разобрать ответ: {}", e))?;

    if !envelope.success {
        return Err(if envelope.message.is_empty() {
            "бэкенд вернул success=false".to_string()
        } else {
            envelope.message
        });
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_path_without_params() {
        assert_eq!(ProductListQuery::default().to_path(), "/api/products");
    }

    #[test]
    fn test_query_path_with_params() {
        let query = ProductListQuery {
            category: Some("Плитка".to_string()),
            price_min: Some(100.0),
            is_active: Some(true),
            ..Default::default()
        };
        let path = query.to_path();
        assert!(path.starts_with("/api/products?"));
        assert!(path.contains("priceMin=100"));
        assert!(path.contains("isActive=true"));
        // ключи отсутствующих фильтров в query string не попадают
        assert!(!path.contains("priceMax"));
        assert!(!path.contains("search"));
    }
}

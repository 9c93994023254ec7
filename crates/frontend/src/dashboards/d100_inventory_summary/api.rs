use contracts::dashboards::d100_inventory_summary::{CategoryAnalytics, InventorySummary};
use contracts::domain::common::ApiEnvelope;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::{api_url, Fetched};
use crate::shared::fallback::{fallback_categories, fallback_summary};
use crate::shared::fetch_cache::FetchCache;

const SUMMARY_PATH: &str = "/api/dashboard/summary";
const CATEGORIES_PATH: &str = "/api/dashboard/categories";

/// Сводка склада: метрики, топ продаж, дефицит.
pub async fn fetch_summary(cache: &FetchCache, force_refresh: bool) -> Fetched<InventorySummary> {
    fetch_dashboard(cache, SUMMARY_PATH, force_refresh, fallback_summary).await
}

/// Разбивка по категориям.
pub async fn fetch_categories(
    cache: &FetchCache,
    force_refresh: bool,
) -> Fetched<Vec<CategoryAnalytics>> {
    fetch_dashboard(cache, CATEGORIES_PATH, force_refresh, fallback_categories).await
}

/// Общий порядок деградации дашборда тот же, что у списков:
/// живой кэш (если не force) -> сеть -> протухший кэш -> placeholder.
async fn fetch_dashboard<T, F>(
    cache: &FetchCache,
    path: &str,
    force_refresh: bool,
    fallback: F,
) -> Fetched<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if !force_refresh {
        if let Some(value) = cache.get(path) {
            if let Ok(data) = serde_json::from_value::<T>(value) {
                return Fetched::live(data);
            }
        }
    }

    match request_dashboard::<T>(path).await {
        Ok(data) => {
            if let Ok(value) = serde_json::to_value(&data) {
                cache.put(path, value);
            }
            Fetched::live(data)
        }
        Err(err) => {
            log::warn!("Дашборд {} недоступен: {}", path, err);
            if let Some(value) = cache.get_stale(path) {
                if let Ok(data) = serde_json::from_value::<T>(value) {
                    return Fetched::cached(data);
                }
            }
            Fetched::fallback(fallback())
        }
    }
}

async fn request_dashboard<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("запрос не прошёл: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<T> = response
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

    Ok(envelope.data)
}

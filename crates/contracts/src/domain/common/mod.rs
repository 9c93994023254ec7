use serde::{Deserialize, Serialize};

/// Общий конверт ответа REST API.
///
/// Бэкенд заворачивает каждый ответ в `{ success, message, data, metadata? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
    #[serde(default)]
    pub metadata: Option<ListMetadata>,
}

/// Метаданные списочных ответов (серверная пагинация).
///
/// Некоторые endpoints отдают ключи в lowercase, поэтому alias'ы.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMetadata {
    #[serde(rename = "totalCount", alias = "totalcount", default)]
    pub total_count: usize,
    #[serde(rename = "pageSize", alias = "pagesize", default)]
    pub page_size: usize,
}

impl<T> ApiEnvelope<T> {
    /// Успешный конверт без метаданных (используется в тестах и fallback).
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data,
            metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_camel_case_metadata() {
        let json = r#"{"success":true,"message":"ok","data":[1,2],"metadata":{"totalCount":120,"pageSize":50}}"#;
        let env: ApiEnvelope<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(env.success);
        assert_eq!(env.data, vec![1, 2]);
        let meta = env.metadata.unwrap();
        assert_eq!(meta.total_count, 120);
        assert_eq!(meta.page_size, 50);
    }

    #[test]
    fn test_envelope_with_lowercase_metadata() {
        let json = r#"{"success":true,"data":7,"metadata":{"totalcount":3,"pagesize":10}}"#;
        let env: ApiEnvelope<i32> = serde_json::from_str(json).unwrap();
        let meta = env.metadata.unwrap();
        assert_eq!(meta.total_count, 3);
        assert_eq!(meta.page_size, 10);
    }

    #[test]
    fn test_envelope_without_metadata() {
        let json = r#"{"success":false,"message":"boom","data":null}"#;
        let env: ApiEnvelope<Option<i32>> = serde_json::from_str(json).unwrap();
        assert!(!env.success);
        assert_eq!(env.message, "boom");
        assert!(env.metadata.is_none());
    }
}

//! Вспомогательные функции для запросов к бэкенду.

/// Базовый URL API: текущий хост, порт 3000.
///
/// Возвращает пустую строку, если window недоступен (тесты вне браузера).
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL по пути вида "/api/products".
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Откуда пришли данные после fetch. Страницы показывают inline-notice
/// для всего, что не Live, но продолжают рендериться.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Свежий ответ бэкенда.
    Live,
    /// Последний удачный ответ из кэша (бэкенд недоступен).
    Cache,
    /// Встроенный placeholder-набор.
    Fallback,
}

/// Данные вместе с их происхождением.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub fn cached(data: T) -> Self {
        Self {
            data,
            source: DataSource::Cache,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
        }
    }

    /// Текст ненавязчивого уведомления для страницы; None для Live.
    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            DataSource::Live => None,
            DataSource::Cache => Some("Бэкенд недоступен, показаны данные из кэша"),
            DataSource::Fallback => Some("Бэкенд недоступен, показаны демонстрационные данные"),
        }
    }
}

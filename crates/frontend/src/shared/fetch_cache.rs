//! Кэш ответов API с TTL и защита от устаревших ответов.
//!
//! Кэш — явный объект с внедрёнными часами и TTL, создаётся один раз на
//! сессию приложения и раздаётся местам вызова fetch через context.
//! Чтения синхронные и без побочных эффектов; запись — только после
//! успешного запроса.

use chrono::{DateTime, Duration, Utc};
use leptos::prelude::use_context;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// TTL кэша по умолчанию.
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Источник времени. В тестах подменяется фейковыми часами.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Настоящие часы.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedEntry {
    stored_at: DateTime<Utc>,
    value: serde_json::Value,
}

/// Кэш последних успешных ответов, ключ — endpoint с query string.
pub struct FetchCache<C: Clock = WallClock> {
    ttl: Duration,
    clock: C,
    entries: RwLock<HashMap<String, CachedEntry>>,
}

impl FetchCache<WallClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, WallClock)
    }

    pub fn with_default_ttl() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl<C: Clock> FetchCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Живая запись по ключу, если TTL ещё не истёк. Протухшие записи
    /// не вычищаются при чтении — их перезапишет следующий fetch.
    pub fn get(&self, endpoint: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(endpoint)?;
        if self.clock.now() - entry.stored_at > self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Запись по ключу независимо от TTL — последний удачный ответ
    /// годится как fallback при недоступном бэкенде.
    pub fn get_stale(&self, endpoint: &str) -> Option<serde_json::Value> {
        self.entries
            .read()
            .ok()?
            .get(endpoint)
            .map(|entry| entry.value.clone())
    }

    pub fn put(&self, endpoint: &str, value: serde_json::Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                endpoint.to_string(),
                CachedEntry {
                    stored_at: self.clock.now(),
                    value,
                },
            );
        }
    }
}

/// Кэш сессии приложения, раздаётся через leptos context.
#[derive(Clone)]
pub struct ApiCache(pub Arc<FetchCache>);

impl ApiCache {
    pub fn new() -> Self {
        Self(Arc::new(FetchCache::with_default_ttl()))
    }
}

impl Default for ApiCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Кэш из context; вне приложения (тесты) — свежий пустой.
pub fn use_api_cache() -> ApiCache {
    use_context::<ApiCache>().unwrap_or_default()
}

/// Монотонный счётчик запросов: защита от устаревших ответов.
///
/// Каждый запрос берёт билет через `next()`; ответ применяется, только
/// если билет всё ещё последний. Последний выигравший запрос полностью
/// замещает snapshot, слияния нет.
#[derive(Debug, Default)]
pub struct RequestSeq(AtomicU64);

impl RequestSeq {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeClock(Cell<DateTime<Utc>>);

    impl FakeClock {
        fn new() -> Self {
            Self(Cell::new(Utc::now()))
        }

        fn advance(&self, minutes: i64) {
            self.0.set(self.0.get() + Duration::minutes(minutes));
        }
    }

    impl Clock for &FakeClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = FakeClock::new();
        let cache = FetchCache::with_clock(Duration::minutes(5), &clock);
        cache.put("/api/products", serde_json::json!({"x": 1}));

        clock.advance(4);
        assert_eq!(cache.get("/api/products"), Some(serde_json::json!({"x": 1})));
    }

    #[test]
    fn test_expired_after_ttl() {
        let clock = FakeClock::new();
        let cache = FetchCache::with_clock(Duration::minutes(5), &clock);
        cache.put("/api/products", serde_json::json!(1));

        clock.advance(6);
        assert_eq!(cache.get("/api/products"), None);
        // но как fallback запись ещё доступна
        assert_eq!(cache.get_stale("/api/products"), Some(serde_json::json!(1)));
    }

    #[test]
    fn test_put_refreshes_timestamp() {
        let clock = FakeClock::new();
        let cache = FetchCache::with_clock(Duration::minutes(5), &clock);
        cache.put("/k", serde_json::json!(1));
        clock.advance(4);
        cache.put("/k", serde_json::json!(2));
        clock.advance(4);
        assert_eq!(cache.get("/k"), Some(serde_json::json!(2)));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let clock = FakeClock::new();
        let cache = FetchCache::with_clock(Duration::minutes(5), &clock);
        assert_eq!(cache.get("/nope"), None);
        assert_eq!(cache.get_stale("/nope"), None);
    }

    #[test]
    fn test_request_seq_last_write_wins() {
        let seq = RequestSeq::default();
        let first = seq.next();
        let second = seq.next();

        // Поздний ответ первого запроса игнорируется
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));

        let third = seq.next();
        assert!(!seq.is_current(second));
        assert!(seq.is_current(third));
    }
}

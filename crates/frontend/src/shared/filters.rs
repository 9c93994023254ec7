//! Декларативные фильтры списков.
//!
//! Критерий описывает поле и тип фильтра, значение хранится отдельно в
//! map по ключу. Итоговый предикат — логическое И всех непустых
//! критериев плюс общий поиск по подстроке.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Text,
    Select,
    MultiSelect,
    Range,
    Date,
    Boolean,
}

/// Описание одного критерия фильтрации.
#[derive(Debug, Clone)]
pub struct FilterCriterion {
    pub key: &'static str,
    /// Название для панели фильтров и chip'ов.
    pub label: &'static str,
    pub filter_type: FilterType,
}

impl FilterCriterion {
    pub const fn new(key: &'static str, label: &'static str, filter_type: FilterType) -> Self {
        Self {
            key,
            label,
            filter_type,
        }
    }
}

/// Текущее значение критерия. Форма зависит от типа.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Select(Option<String>),
    Multi(Vec<String>),
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    DateRange {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// Tri-state: None — фильтр не применяется.
    Flag(Option<bool>),
}

impl FilterValue {
    /// Пустое значение не участвует в предикате и не считается активным.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Select(v) => v.as_deref().map_or(true, |s| s.is_empty()),
            FilterValue::Multi(vs) => vs.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::DateRange { start, end } => start.is_none() && end.is_none(),
            FilterValue::Flag(v) => v.is_none(),
        }
    }
}

/// Типизированный доступ к полям записи по ключу критерия.
///
/// Аналог Searchable из списков: запись сама знает, как отдать поле
/// строкой, числом, датой или флагом.
pub trait Filterable {
    fn text_field(&self, key: &str) -> Option<String>;
    fn number_field(&self, key: &str) -> Option<f64>;
    fn date_field(&self, key: &str) -> Option<DateTime<Utc>>;
    fn bool_field(&self, key: &str) -> Option<bool>;

    /// Поля, по которым работает общий поиск.
    fn search_haystack(&self) -> Vec<String>;
}

fn matches_criterion<T: Filterable>(item: &T, criterion: &FilterCriterion, value: &FilterValue) -> bool {
    if value.is_empty() {
        return true;
    }

    match (criterion.filter_type, value) {
        (FilterType::Text, FilterValue::Text(query)) => item
            .text_field(criterion.key)
            .map_or(false, |field| {
                field.to_lowercase().contains(&query.trim().to_lowercase())
            }),

        (FilterType::Select, FilterValue::Select(Some(selected))) => item
            .text_field(criterion.key)
            .map_or(false, |field| &field == selected),

        (FilterType::MultiSelect, FilterValue::Multi(selected)) => item
            .text_field(criterion.key)
            .map_or(false, |field| selected.iter().any(|s| s == &field)),

        (FilterType::Range, FilterValue::Range { min, max }) => {
            match item.number_field(criterion.key) {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            }
        }

        (FilterType::Date, FilterValue::DateRange { start, end }) => {
            match item.date_field(criterion.key) {
                Some(d) => start.map_or(true, |s| d >= s) && end.map_or(true, |e| d <= e),
                None => false,
            }
        }

        (FilterType::Boolean, FilterValue::Flag(Some(expected))) => {
            item.bool_field(criterion.key) == Some(*expected)
        }

        // Значение не той формы, что ждёт критерий — фильтр не применяется
        _ => true,
    }
}

/// Предикат по всем критериям: И непустых значений.
pub fn matches_all<T: Filterable>(
    item: &T,
    criteria: &[FilterCriterion],
    values: &HashMap<String, FilterValue>,
) -> bool {
    criteria.iter().all(|criterion| {
        values
            .get(criterion.key)
            .map_or(true, |value| matches_criterion(item, criterion, value))
    })
}

/// Общий поиск: регистронезависимая подстрока по фиксированному набору
/// полей записи. Пустой запрос пропускает всё.
pub fn search_matches<T: Filterable>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.search_haystack()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Число активных (непустых) фильтров — для badge на панели.
pub fn active_count(values: &HashMap<String, FilterValue>) -> usize {
    values.values().filter(|v| !v.is_empty()).count()
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Текст chip'а активного фильтра; None для пустого значения.
pub fn describe(criterion: &FilterCriterion, value: &FilterValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let text = match value {
        FilterValue::Text(s) => s.trim().to_string(),
        FilterValue::Select(Some(s)) => s.clone(),
        FilterValue::Select(None) => return None,
        FilterValue::Multi(vs) => vs.join(", "),
        FilterValue::Range { min, max } => match (min, max) {
            (Some(min), Some(max)) => format!("от {} до {}", format_number(*min), format_number(*max)),
            (Some(min), None) => format!("от {}", format_number(*min)),
            (None, Some(max)) => format!("до {}", format_number(*max)),
            (None, None) => return None,
        },
        FilterValue::DateRange { start, end } => {
            let fmt = |d: &DateTime<Utc>| d.format("%d.%m.%Y").to_string();
            match (start, end) {
                (Some(s), Some(e)) => format!("с {} по {}", fmt(s), fmt(e)),
                (Some(s), None) => format!("с {}", fmt(s)),
                (None, Some(e)) => format!("по {}", fmt(e)),
                (None, None) => return None,
            }
        }
        FilterValue::Flag(Some(true)) => "Да".to_string(),
        FilterValue::Flag(Some(false)) => "Нет".to_string(),
        FilterValue::Flag(None) => return None,
    };

    Some(format!("{}: {}", criterion.label, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Row {
        name: String,
        category: String,
        price: f64,
        active: bool,
        restocked: Option<DateTime<Utc>>,
    }

    impl Filterable for Row {
        fn text_field(&self, key: &str) -> Option<String> {
            match key {
                "name" => Some(self.name.clone()),
                "category" => Some(self.category.clone()),
                _ => None,
            }
        }

        fn number_field(&self, key: &str) -> Option<f64> {
            match key {
                "price" => Some(self.price),
                _ => None,
            }
        }

        fn date_field(&self, key: &str) -> Option<DateTime<Utc>> {
            match key {
                "restocked" => self.restocked,
                _ => None,
            }
        }

        fn bool_field(&self, key: &str) -> Option<bool> {
            match key {
                "active" => Some(self.active),
                _ => None,
            }
        }

        fn search_haystack(&self) -> Vec<String> {
            vec![self.name.clone(), self.category.clone()]
        }
    }

    fn row(name: &str, category: &str, price: f64) -> Row {
        Row {
            name: name.to_string(),
            category: category.to_string(),
            price,
            active: true,
            restocked: None,
        }
    }

    const PRICE: FilterCriterion = FilterCriterion::new("price", "Цена", FilterType::Range);
    const CATEGORY: FilterCriterion = FilterCriterion::new("category", "Категория", FilterType::Select);
    const ACTIVE: FilterCriterion = FilterCriterion::new("active", "Активен", FilterType::Boolean);

    #[test]
    fn test_price_range() {
        let criteria = [PRICE];
        let mut values = HashMap::new();
        values.insert(
            "price".to_string(),
            FilterValue::Range {
                min: Some(10.0),
                max: Some(20.0),
            },
        );

        assert!(matches_all(&row("a", "x", 15.0), &criteria, &values));
        assert!(matches_all(&row("b", "x", 10.0), &criteria, &values));
        assert!(matches_all(&row("c", "x", 20.0), &criteria, &values));
        assert!(!matches_all(&row("d", "x", 25.0), &criteria, &values));
    }

    #[test]
    fn test_no_active_filters_is_identity() {
        let criteria = [PRICE, CATEGORY, ACTIVE];
        let mut values = HashMap::new();
        values.insert("price".to_string(), FilterValue::Range { min: None, max: None });
        values.insert("category".to_string(), FilterValue::Select(None));
        values.insert("active".to_string(), FilterValue::Flag(None));

        let rows = vec![row("a", "x", 1.0), row("b", "y", 2.0), row("c", "z", 3.0)];
        let kept: Vec<&Row> = rows
            .iter()
            .filter(|r| matches_all(*r, &criteria, &values) && search_matches(*r, ""))
            .collect();
        assert_eq!(kept.len(), rows.len());
    }

    #[test]
    fn test_select_exact_match() {
        let criteria = [CATEGORY];
        let mut values = HashMap::new();
        values.insert(
            "category".to_string(),
            FilterValue::Select(Some("Плитка".to_string())),
        );

        assert!(matches_all(&row("a", "Плитка", 1.0), &criteria, &values));
        assert!(!matches_all(&row("b", "плитка", 1.0), &criteria, &values));
    }

    #[test]
    fn test_multiselect_membership() {
        let supplier = FilterCriterion::new("category", "Категория", FilterType::MultiSelect);
        let criteria = [supplier];
        let mut values = HashMap::new();
        values.insert(
            "category".to_string(),
            FilterValue::Multi(vec!["x".to_string(), "y".to_string()]),
        );

        assert!(matches_all(&row("a", "x", 1.0), &criteria, &values));
        assert!(matches_all(&row("b", "y", 1.0), &criteria, &values));
        assert!(!matches_all(&row("c", "z", 1.0), &criteria, &values));
    }

    #[test]
    fn test_boolean_tri_state() {
        let criteria = [ACTIVE];
        let mut inactive = row("a", "x", 1.0);
        inactive.active = false;

        let mut values = HashMap::new();
        values.insert("active".to_string(), FilterValue::Flag(Some(true)));
        assert!(!matches_all(&inactive, &criteria, &values));

        values.insert("active".to_string(), FilterValue::Flag(Some(false)));
        assert!(matches_all(&inactive, &criteria, &values));

        values.insert("active".to_string(), FilterValue::Flag(None));
        assert!(matches_all(&inactive, &criteria, &values));
    }

    #[test]
    fn test_date_range_inclusive() {
        let restocked = FilterCriterion::new("restocked", "Поступление", FilterType::Date);
        let criteria = [restocked];
        let day = |d: u32| Utc.with_ymd_and_hms(2026, 8, d, 0, 0, 0).unwrap();

        let mut r = row("a", "x", 1.0);
        r.restocked = Some(day(10));

        let mut values = HashMap::new();
        values.insert(
            "restocked".to_string(),
            FilterValue::DateRange {
                start: Some(day(10)),
                end: Some(day(20)),
            },
        );
        assert!(matches_all(&r, &criteria, &values));

        values.insert(
            "restocked".to_string(),
            FilterValue::DateRange {
                start: Some(day(11)),
                end: None,
            },
        );
        assert!(!matches_all(&r, &criteria, &values));
    }

    #[test]
    fn test_search_case_insensitive() {
        let r = row("Раковина Nano-55", "Сантехника", 1.0);
        assert!(search_matches(&r, "nano"));
        assert!(search_matches(&r, "САНТЕХ"));
        assert!(!search_matches(&r, "плитка"));
        assert!(search_matches(&r, "   "));
    }

    #[test]
    fn test_active_count() {
        let mut values: HashMap<String, FilterValue> = HashMap::new();
        assert_eq!(active_count(&values), 0);

        values.insert("category".to_string(), FilterValue::Select(None));
        values.insert("price".to_string(), FilterValue::Range { min: None, max: None });
        assert_eq!(active_count(&values), 0);

        values.insert(
            "category".to_string(),
            FilterValue::Select(Some("Плитка".to_string())),
        );
        assert_eq!(active_count(&values), 1);

        values.insert(
            "price".to_string(),
            FilterValue::Range {
                min: Some(1.0),
                max: None,
            },
        );
        assert_eq!(active_count(&values), 2);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&CATEGORY, &FilterValue::Select(Some("Плитка".to_string()))),
            Some("Категория: Плитка".to_string())
        );
        assert_eq!(
            describe(&PRICE, &FilterValue::Range { min: Some(10.0), max: Some(20.0) }),
            Some("Цена: от 10 до 20".to_string())
        );
        assert_eq!(
            describe(&PRICE, &FilterValue::Range { min: None, max: Some(99.5) }),
            Some("Цена: до 99.5".to_string())
        );
        assert_eq!(describe(&ACTIVE, &FilterValue::Flag(None)), None);
        assert_eq!(
            describe(&ACTIVE, &FilterValue::Flag(Some(false))),
            Some("Активен: Нет".to_string())
        );
    }
}

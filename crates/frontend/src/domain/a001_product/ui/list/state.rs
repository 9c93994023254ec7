use crate::domain::a001_product::api::ProductListQuery;
use crate::shared::filters::{self, FilterCriterion, FilterType, FilterValue};
use crate::shared::pagination::PaginationState;
use leptos::prelude::*;
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Критерии фильтрации списка товаров. Ключи совпадают с полями wire-формата.
pub fn product_criteria() -> Vec<FilterCriterion> {
    vec![
        FilterCriterion::new("category", "Категория", FilterType::Select),
        FilterCriterion::new("supplier", "Поставщик", FilterType::MultiSelect),
        FilterCriterion::new("price", "Цена", FilterType::Range),
        FilterCriterion::new("lastRestockedAt", "Поступление", FilterType::Date),
        FilterCriterion::new("isActive", "Активен", FilterType::Boolean),
    ]
}

#[derive(Clone, Debug)]
pub struct ProductListState {
    // Поиск и фильтры
    pub search: String,
    pub filter_values: HashMap<String, FilterValue>,

    // Сортировка
    pub sort_field: String,
    pub sort_ascending: bool,

    // Клиентская пагинация (страницы с 1)
    pub pagination: PaginationState,

    // Флаг первой загрузки
    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_values: HashMap::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            pagination: PaginationState::new(DEFAULT_PAGE_SIZE),
            is_loaded: false,
        }
    }
}

impl ProductListState {
    pub fn active_filter_count(&self) -> usize {
        filters::active_count(&self.filter_values)
    }

    /// Установка значения фильтра со сбросом на первую страницу.
    pub fn set_filter(&mut self, key: &str, value: FilterValue) {
        self.filter_values.insert(key.to_string(), value);
        self.pagination.current_page = 1;
    }

    pub fn remove_filter(&mut self, key: &str) {
        self.filter_values.remove(key);
        self.pagination.current_page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter_values.clear();
        self.pagination.current_page = 1;
    }

    /// Query для бэкенда из текущего поиска и фильтров.
    pub fn to_query(&self) -> ProductListQuery {
        let category = match self.filter_values.get("category") {
            Some(FilterValue::Select(Some(v))) if !v.is_empty() => Some(v.clone()),
            _ => None,
        };
        let (price_min, price_max) = match self.filter_values.get("price") {
            Some(FilterValue::Range { min, max }) => (*min, *max),
            _ => (None, None),
        };
        let is_active = match self.filter_values.get("isActive") {
            Some(FilterValue::Flag(flag)) => *flag,
            _ => None,
        };
        let search = self.search.trim();

        ProductListQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            category,
            price_min,
            price_max,
            is_active,
        }
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}

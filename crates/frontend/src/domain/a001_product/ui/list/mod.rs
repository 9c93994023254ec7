pub mod state;

use crate::domain::a001_product::api::fetch_products;
use crate::shared::components::filter_panel::{slot, FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::fetch_cache::{use_api_cache, RequestSeq};
use crate::shared::filters::{self, FilterValue, Filterable};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::pagination::{page_window, PageItem, PaginationState, DEFAULT_MAX_VISIBLE};
use crate::shared::sorting::{sort_indicator, sort_list, Sortable};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use contracts::domain::a001_product::{Availability, Product};
use leptos::prelude::*;
use state::{create_state, product_criteria};
use std::cmp::Ordering;
use std::sync::Arc;

impl Filterable for Product {
    fn text_field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "category" => Some(self.category.clone()),
            "supplier" => self.supplier.clone(),
            _ => None,
        }
    }

    fn number_field(&self, key: &str) -> Option<f64> {
        match key {
            "price" => Some(self.price),
            "quantity" => Some(self.quantity as f64),
            "minQuantity" => Some(self.min_quantity as f64),
            "totalValue" => Some(self.total_value()),
            _ => None,
        }
    }

    fn date_field(&self, key: &str) -> Option<DateTime<Utc>> {
        match key {
            "lastRestockedAt" => self.last_restocked_at,
            "createdAt" => self.created_at,
            "updatedAt" => self.updated_at,
            _ => None,
        }
    }

    fn bool_field(&self, key: &str) -> Option<bool> {
        match key {
            "isActive" => Some(self.is_active),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut fields = vec![
            self.name.clone(),
            self.category.clone(),
            self.id.as_str().to_string(),
        ];
        if let Some(supplier) = &self.supplier {
            fields.push(supplier.clone());
        }
        fields
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "category" => self.category.to_lowercase().cmp(&other.category.to_lowercase()),
            "supplier" => {
                let a = self.supplier.as_deref().unwrap_or_default().to_lowercase();
                let b = other.supplier.as_deref().unwrap_or_default().to_lowercase();
                a.cmp(&b)
            }
            "price" => self.price.total_cmp(&other.price),
            "quantity" => self.quantity.cmp(&other.quantity),
            "totalValue" => self.total_value().total_cmp(&other.total_value()),
            "availability" => availability_rank(self.availability())
                .cmp(&availability_rank(other.availability())),
            _ => Ordering::Equal,
        }
    }
}

// Порядок статусов в сортировке: сначала проблемные
fn availability_rank(a: Availability) -> u8 {
    match a {
        Availability::OutOfStock => 0,
        Availability::LowStock => 1,
        Availability::InStock => 2,
    }
}

pub fn availability_badge(a: Availability) -> AnyView {
    let class = match a {
        Availability::InStock => "badge badge--success",
        Availability::LowStock => "badge badge--warning",
        Availability::OutOfStock => "badge badge--error",
    };
    view! { <span class=class>{a.label()}</span> }.into_any()
}

pub fn format_price(value: f64) -> String {
    format!("{:.2} ₽", value).replace('.', ",")
}

fn parse_day_start(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let dt = date.and_hms_opt(0, 0, 0)?;
    Utc.from_local_datetime(&dt).single()
}

fn parse_day_end(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let dt = date.and_hms_opt(23, 59, 59)?;
    Utc.from_local_datetime(&dt).single()
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (notice, set_notice) = signal::<Option<String>>(None);
    let state = create_state();
    let is_expanded = RwSignal::new(false);

    let cache = use_api_cache();
    let seq = StoredValue::new(Arc::new(RequestSeq::default()));

    let fetch = move |force: bool| {
        let cache = cache.clone();
        let seq = seq.get_value();
        let ticket = seq.next();
        // Активные фильтры уходят бэкенду; ответ всё равно проходит
        // клиентский pipeline
        let query = state.with_untracked(|st| st.to_query());
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_products(&cache.0, &query, force).await;
            // Суперсед: более новый запрос уже в полёте или завершён
            if !seq.is_current(ticket) {
                return;
            }
            set_notice.set(result.notice().map(str::to_string));
            let (products, _metadata) = result.data;
            set_items.set(products);
            state.update(|st| st.is_loaded = true);
        });
    };

    // Отфильтрованный и отсортированный рабочий набор
    let filtered_sorted = move || -> Vec<Product> {
        let st = state.get();
        let criteria = product_criteria();
        let mut result: Vec<Product> = items
            .get()
            .into_iter()
            .filter(|p| filters::matches_all(p, &criteria, &st.filter_values))
            .filter(|p| filters::search_matches(p, &st.search))
            .collect();
        sort_list(&mut result, &st.sort_field, st.sort_ascending);
        result
    };

    // Пагинация поверх рабочего набора; кламп — до вызова page_window
    let current_pagination = move || -> PaginationState {
        let st = state.get();
        let mut pagination = st.pagination;
        pagination.total_items = filtered_sorted().len();
        pagination.clamp_current_page();
        pagination
    };

    let page_items = move || -> Vec<Product> {
        current_pagination().page_slice(&filtered_sorted()).to_vec()
    };

    let go_to_page = move |target: usize| {
        let total_items = filtered_sorted().len();
        state.update(|st| {
            st.pagination.total_items = total_items;
            st.pagination.clamp_current_page();
            if !st.pagination.jump_to_page(target) {
                log::warn!("Переход на страницу {} вне диапазона отклонён", target);
            }
        });
    };

    let change_page_size = move |size: usize| {
        state.update(|st| st.pagination.set_page_size(size));
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|st| {
                if st.sort_field == field {
                    st.sort_ascending = !st.sort_ascending;
                } else {
                    st.sort_field = field.to_string();
                    st.sort_ascending = true;
                }
            });
        }
    };

    // Варианты для select'ов собираются из загруженных данных
    let categories = move || -> Vec<String> {
        let mut values: Vec<String> = items
            .get()
            .iter()
            .map(|p| p.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        values.sort();
        values.dedup();
        values
    };

    let suppliers = move || -> Vec<String> {
        let mut values: Vec<String> = items
            .get()
            .iter()
            .filter_map(|p| p.supplier.clone())
            .filter(|s| !s.is_empty())
            .collect();
        values.sort();
        values.dedup();
        values
    };

    let price_bounds = move || -> (Option<f64>, Option<f64>) {
        match state.get().filter_values.get("price") {
            Some(FilterValue::Range { min, max }) => (*min, *max),
            _ => (None, None),
        }
    };

    let date_bounds = move || -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match state.get().filter_values.get("lastRestockedAt") {
            Some(FilterValue::DateRange { start, end }) => (*start, *end),
            _ => (None, None),
        }
    };

    let selected_suppliers = move || -> Vec<String> {
        match state.get().filter_values.get("supplier") {
            Some(FilterValue::Multi(values)) => values.clone(),
            _ => Vec::new(),
        }
    };

    fetch(false);

    view! {
        <div class="content">
            <div class="header">
                <h2>{"Товары"}</h2>
                <div class="header-actions">
                    <SearchInput
                        value=Signal::derive(move || state.get().search)
                        on_change=Callback::new(move |value: String| {
                            state.update(|st| {
                                st.search = value;
                                st.pagination.current_page = 1;
                            });
                        })
                        placeholder="Поиск по товарам...".to_string()
                    />
                    <button class="btn btn-secondary" on:click=move |_| fetch(true)>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            {move || notice.get().map(|text| view! {
                <div class="notice notice--inline">{text}</div>
            })}

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=Signal::derive(move || state.get().active_filter_count())
                on_clear_all=Callback::new(move |_| state.update(|st| st.clear_filters()))
                pagination_controls=slot(move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || current_pagination().current_page)
                        total_pages=Signal::derive(move || current_pagination().total_pages())
                        total_count=Signal::derive(move || filtered_sorted().len())
                        page_size=Signal::derive(move || state.get().pagination.page_size)
                        on_page_change=Callback::new(go_to_page)
                        on_page_size_change=Callback::new(change_page_size)
                    />
                }.into_any())
                filter_content=slot(move || view! {
                    <div class="filter-fields">
                        <label class="filter-field">
                            <span>{"Категория"}</span>
                            <select
                                class="form-control"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|st| {
                                        if value.is_empty() {
                                            st.remove_filter("category");
                                        } else {
                                            st.set_filter("category", FilterValue::Select(Some(value.clone())));
                                        }
                                    });
                                }
                            >
                                <option value="">{"Все категории"}</option>
                                {move || categories().into_iter().map(|c| {
                                    let selected = matches!(
                                        state.get().filter_values.get("category"),
                                        Some(FilterValue::Select(Some(v))) if v == &c
                                    );
                                    view! { <option value={c.clone()} selected=selected>{c.clone()}</option> }
                                }).collect_view()}
                            </select>
                        </label>

                        <div class="filter-field">
                            <span>{"Поставщик"}</span>
                            {move || suppliers().into_iter().map(|supplier| {
                                let checked = selected_suppliers().contains(&supplier);
                                let supplier_for_change = supplier.clone();
                                view! {
                                    <label class="filter-checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=checked
                                            on:change=move |ev| {
                                                let checked = event_target_checked(&ev);
                                                let supplier = supplier_for_change.clone();
                                                state.update(|st| {
                                                    let mut selected = match st.filter_values.get("supplier") {
                                                        Some(FilterValue::Multi(v)) => v.clone(),
                                                        _ => Vec::new(),
                                                    };
                                                    if checked {
                                                        if !selected.contains(&supplier) {
                                                            selected.push(supplier.clone());
                                                        }
                                                    } else {
                                                        selected.retain(|s| s != &supplier);
                                                    }
                                                    st.set_filter("supplier", FilterValue::Multi(selected));
                                                });
                                            }
                                        />
                                        {supplier.clone()}
                                    </label>
                                }
                            }).collect_view()}
                        </div>

                        <div class="filter-field">
                            <span>{"Цена"}</span>
                            <input
                                type="number"
                                class="form-control"
                                placeholder="от"
                                prop:value=move || price_bounds().0.map(|v| v.to_string()).unwrap_or_default()
                                on:change=move |ev| {
                                    let min = event_target_value(&ev).parse::<f64>().ok();
                                    state.update(|st| {
                                        let max = match st.filter_values.get("price") {
                                            Some(FilterValue::Range { max, .. }) => *max,
                                            _ => None,
                                        };
                                        st.set_filter("price", FilterValue::Range { min, max });
                                    });
                                }
                            />
                            <input
                                type="number"
                                class="form-control"
                                placeholder="до"
                                prop:value=move || price_bounds().1.map(|v| v.to_string()).unwrap_or_default()
                                on:change=move |ev| {
                                    let max = event_target_value(&ev).parse::<f64>().ok();
                                    state.update(|st| {
                                        let min = match st.filter_values.get("price") {
                                            Some(FilterValue::Range { min, .. }) => *min,
                                            _ => None,
                                        };
                                        st.set_filter("price", FilterValue::Range { min, max });
                                    });
                                }
                            />
                        </div>

                        <div class="filter-field">
                            <span>{"Поступление"}</span>
                            <input
                                type="date"
                                class="form-control"
                                prop:value=move || {
                                    date_bounds().0.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
                                }
                                on:change=move |ev| {
                                    let start = parse_day_start(&event_target_value(&ev));
                                    state.update(|st| {
                                        let end = match st.filter_values.get("lastRestockedAt") {
                                            Some(FilterValue::DateRange { end, .. }) => *end,
                                            _ => None,
                                        };
                                        st.set_filter("lastRestockedAt", FilterValue::DateRange { start, end });
                                    });
                                }
                            />
                            <input
                                type="date"
                                class="form-control"
                                prop:value=move || {
                                    date_bounds().1.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
                                }
                                on:change=move |ev| {
                                    let end = parse_day_end(&event_target_value(&ev));
                                    state.update(|st| {
                                        let start = match st.filter_values.get("lastRestockedAt") {
                                            Some(FilterValue::DateRange { start, .. }) => *start,
                                            _ => None,
                                        };
                                        st.set_filter("lastRestockedAt", FilterValue::DateRange { start, end });
                                    });
                                }
                            />
                        </div>

                        <label class="filter-field">
                            <span>{"Статус"}</span>
                            <select
                                class="form-control"
                                on:change=move |ev| {
                                    let flag = match event_target_value(&ev).as_str() {
                                        "true" => Some(true),
                                        "false" => Some(false),
                                        _ => None,
                                    };
                                    state.update(|st| st.set_filter("isActive", FilterValue::Flag(flag)));
                                }
                            >
                                <option value="">{"Все"}</option>
                                <option value="true">{"Активные"}</option>
                                <option value="false">{"Неактивные"}</option>
                            </select>
                        </label>
                    </div>
                }.into_any())
                filter_tags=slot(move || {
                    let st = state.get();
                    product_criteria()
                        .into_iter()
                        .filter_map(|criterion| {
                            let value = st.filter_values.get(criterion.key)?;
                            let label = filters::describe(&criterion, value)?;
                            let key = criterion.key;
                            Some(view! {
                                <FilterTag
                                    label=label
                                    on_remove=Callback::new(move |_| {
                                        state.update(|s| s.remove_filter(key));
                                    })
                                />
                            })
                        })
                        .collect_view()
                        .into_any()
                })
            />

            <div class="table-container">
                <table>
                    <thead>
                        <tr>
                            <th class="cursor-pointer" on:click=toggle_sort("name")>
                                {move || {
                                    let st = state.get();
                                    format!("Наименование{}", sort_indicator(&st.sort_field, "name", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("category")>
                                {move || {
                                    let st = state.get();
                                    format!("Категория{}", sort_indicator(&st.sort_field, "category", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("price")>
                                {move || {
                                    let st = state.get();
                                    format!("Цена{}", sort_indicator(&st.sort_field, "price", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("quantity")>
                                {move || {
                                    let st = state.get();
                                    format!("Остаток{}", sort_indicator(&st.sort_field, "quantity", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("totalValue")>
                                {move || {
                                    let st = state.get();
                                    format!("Стоимость остатка{}", sort_indicator(&st.sort_field, "totalValue", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("availability")>
                                {move || {
                                    let st = state.get();
                                    format!("Наличие{}", sort_indicator(&st.sort_field, "availability", st.sort_ascending))
                                }}
                            </th>
                            <th class="cursor-pointer" on:click=toggle_sort("supplier")>
                                {move || {
                                    let st = state.get();
                                    format!("Поставщик{}", sort_indicator(&st.sort_field, "supplier", st.sort_ascending))
                                }}
                            </th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = page_items();
                            let query = state.get().search;

                            if rows.is_empty() {
                                return view! {
                                    <tr class="empty-state">
                                        <td colspan="7">
                                            {if state.get().is_loaded {
                                                "Ничего не найдено"
                                            } else {
                                                "Загрузка..."
                                            }}
                                        </td>
                                    </tr>
                                }.into_any();
                            }

                            rows.into_iter().map(|p| {
                                let supplier = p.supplier.clone().unwrap_or_else(|| "-".to_string());
                                view! {
                                    <tr>
                                        <td>{highlight_matches(&p.name, &query)}</td>
                                        <td>{highlight_matches(&p.category, &query)}</td>
                                        <td class="numeric">{format_price(p.price)}</td>
                                        <td class="numeric">{p.quantity}</td>
                                        <td class="numeric">{format_price(p.total_value())}</td>
                                        <td>{availability_badge(p.availability())}</td>
                                        <td>{highlight_matches(&supplier, &query)}</td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="7">
                                // Вторая поверхность пагинации рендерит то же окно
                                <div class="table-pagination">
                                    {move || {
                                        let pagination = current_pagination();
                                        let current = pagination.current_page;
                                        page_window(current, pagination.total_pages(), DEFAULT_MAX_VISIBLE)
                                            .into_iter()
                                            .map(|item| match item {
                                                PageItem::Page(page) => view! {
                                                    <button
                                                        class=if page == current { "pagination-btn pagination-btn--current" } else { "pagination-btn" }
                                                        disabled=page == current
                                                        on:click=move |_| go_to_page(page)
                                                    >
                                                        {page.to_string()}
                                                    </button>
                                                }.into_any(),
                                                PageItem::Ellipsis => view! {
                                                    <span class="pagination-ellipsis">{"\u{2026}"}</span>
                                                }.into_any(),
                                            })
                                            .collect_view()
                                    }}
                                    <span class="pagination-info">
                                        {move || {
                                            let pagination = current_pagination();
                                            format!("Страница {} из {}", pagination.current_page, pagination.total_pages())
                                        }}
                                    </span>
                                </div>
                            </td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        </div>
    }
}

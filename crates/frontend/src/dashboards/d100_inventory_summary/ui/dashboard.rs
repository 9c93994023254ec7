use crate::dashboards::d100_inventory_summary::api::{fetch_categories, fetch_summary};
use crate::domain::a001_product::ui::list::{availability_badge, format_price};
use crate::shared::components::stat_card::StatCard;
use crate::shared::fetch_cache::{use_api_cache, RequestSeq};
use crate::shared::icons::icon;
use contracts::dashboards::d100_inventory_summary::{CategoryAnalytics, InventorySummary};
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Период фонового обновления дашборда
const AUTO_REFRESH_MS: u32 = 60_000;

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "₽".to_string(),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn InventoryDashboard() -> impl IntoView {
    let (summary, set_summary) = signal::<Option<InventorySummary>>(None);
    let (categories, set_categories) = signal::<Vec<CategoryAnalytics>>(Vec::new());
    let (notice, set_notice) = signal::<Option<String>>(None);

    let cache = use_api_cache();
    let seq = StoredValue::new(Arc::new(RequestSeq::default()));

    let fetch = move |force: bool| {
        let cache = cache.clone();
        let seq = seq.get_value();
        let ticket = seq.next();
        wasm_bindgen_futures::spawn_local(async move {
            let summary_result = fetch_summary(&cache.0, force).await;
            let categories_result = fetch_categories(&cache.0, force).await;
            if !seq.is_current(ticket) {
                return;
            }
            set_notice.set(
                summary_result
                    .notice()
                    .or_else(|| categories_result.notice())
                    .map(str::to_string),
            );
            set_summary.set(Some(summary_result.data));
            set_categories.set(categories_result.data);
        });
    };

    fetch(false);

    // Фоновое обновление, пока страница смонтирована
    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    {
        let fetch = fetch.clone();
        wasm_bindgen_futures::spawn_local(async move {
            loop {
                TimeoutFuture::new(AUTO_REFRESH_MS).await;
                if !alive.load(Ordering::Relaxed) {
                    break;
                }
                fetch(true);
            }
        });
    }

    let metrics = move || summary.get().map(|s| s.metrics);

    let low_stock_status = Signal::derive(move || match metrics() {
        Some(m) if m.low_stock_count > 0 => IndicatorStatus::Warning,
        Some(_) => IndicatorStatus::Good,
        None => IndicatorStatus::Neutral,
    });
    let out_of_stock_status = Signal::derive(move || match metrics() {
        Some(m) if m.out_of_stock_count > 0 => IndicatorStatus::Bad,
        Some(_) => IndicatorStatus::Good,
        None => IndicatorStatus::Neutral,
    });

    view! {
        <div class="content">
            <div class="header">
                <h2>{"Сводка склада"}</h2>
                <div class="header-actions">
                    <button class="btn btn-secondary" on:click=move |_| fetch(true)>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            {move || notice.get().map(|text| view! {
                <div class="notice notice--inline">{text}</div>
            })}

            <div class="stat-grid">
                <StatCard
                    label="Всего товаров".to_string()
                    icon_name="products".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.total_products as f64))
                    format=ValueFormat::Integer
                    status=IndicatorStatus::Neutral
                />
                <StatCard
                    label="Активные".to_string()
                    icon_name="check-circle".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.active_products as f64))
                    format=ValueFormat::Integer
                    status=IndicatorStatus::Good
                />
                <StatCard
                    label="Мало на складе".to_string()
                    icon_name="alert-triangle".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.low_stock_count as f64))
                    format=ValueFormat::Integer
                    status=low_stock_status
                />
                <StatCard
                    label="Нет в наличии".to_string()
                    icon_name="x-circle".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.out_of_stock_count as f64))
                    format=ValueFormat::Integer
                    status=out_of_stock_status
                />
                <StatCard
                    label="Категорий".to_string()
                    icon_name="tag".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.category_count as f64))
                    format=ValueFormat::Integer
                    status=IndicatorStatus::Neutral
                />
                <StatCard
                    label="Поставщиков".to_string()
                    icon_name="suppliers".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.supplier_count as f64))
                    format=ValueFormat::Integer
                    status=IndicatorStatus::Neutral
                />
                <StatCard
                    label="Средняя цена".to_string()
                    icon_name="coins".to_string()
                    value=Signal::derive(move || metrics().map(|m| m.average_price))
                    format=money()
                    status=IndicatorStatus::Neutral
                />
            </div>

            <div class="dashboard-tables">
                <div class="table-container">
                    <h3>{"Топ по стоимости остатка"}</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>{"Наименование"}</th>
                                <th>{"Категория"}</th>
                                <th>{"Цена"}</th>
                                <th>{"Остаток"}</th>
                                <th>{"Стоимость"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = summary.get().map(|s| s.top_selling).unwrap_or_default();
                                if rows.is_empty() {
                                    return view! {
                                        <tr class="empty-state">
                                            <td colspan="5">{"Нет данных"}</td>
                                        </tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|p| view! {
                                    <tr>
                                        <td>{p.name.clone()}</td>
                                        <td>{p.category.clone()}</td>
                                        <td class="numeric">{format_price(p.price)}</td>
                                        <td class="numeric">{p.quantity}</td>
                                        <td class="numeric">{format_price(p.total_value())}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }}
                        </tbody>
                    </table>
                </div>

                <div class="table-container">
                    <h3>{"Требуют дозаказа"}</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>{"Наименование"}</th>
                                <th>{"Остаток"}</th>
                                <th>{"Мин. остаток"}</th>
                                <th>{"Наличие"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = summary.get().map(|s| s.low_stock).unwrap_or_default();
                                if rows.is_empty() {
                                    return view! {
                                        <tr class="empty-state">
                                            <td colspan="4">{"Дефицита нет"}</td>
                                        </tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|p| view! {
                                    <tr>
                                        <td>{p.name.clone()}</td>
                                        <td class="numeric">{p.quantity}</td>
                                        <td class="numeric">{p.min_quantity}</td>
                                        <td>{availability_badge(p.availability())}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }}
                        </tbody>
                    </table>
                </div>

                <div class="table-container">
                    <h3>{"По категориям"}</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>{"Категория"}</th>
                                <th>{"Товаров"}</th>
                                <th>{"Стоимость остатка"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = categories.get();
                                if rows.is_empty() {
                                    return view! {
                                        <tr class="empty-state">
                                            <td colspan="3">{"Нет данных"}</td>
                                        </tr>
                                    }.into_any();
                                }
                                rows.into_iter().map(|row| view! {
                                    <tr>
                                        <td>{row.category.clone()}</td>
                                        <td class="numeric">{row.product_count}</td>
                                        <td class="numeric">{format_price(row.total_value)}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

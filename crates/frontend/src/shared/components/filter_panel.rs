use crate::shared::icons::icon;
use leptos::prelude::*;
use std::sync::Arc;

/// Обёртка замыкания в слот панели.
pub fn slot<F>(f: F) -> ChildrenFn
where
    F: Fn() -> AnyView + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Сворачиваемая панель фильтров с badge числа активных фильтров.
///
/// Контролы пагинации и поля фильтров передаются слотами — панель не
/// знает, какие критерии у конкретного списка.
#[component]
pub fn FilterPanel(
    /// Развёрнута ли панель
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Число активных фильтров (badge)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Callback сброса всех фильтров
    on_clear_all: Callback<()>,

    /// Слот: контролы пагинации в шапке панели
    #[prop(into)]
    pagination_controls: ChildrenFn,

    /// Слот: поля фильтров
    #[prop(into)]
    filter_content: ChildrenFn,

    /// Слот: chip'ы активных фильтров
    #[prop(optional, into)]
    filter_tags: Option<ChildrenFn>,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-right")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Фильтры"</span>
                    {move || {
                        let count = active_filters_count.get();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{count}</span>
                                <button
                                    class="btn btn-link"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_clear_all.run(());
                                    }
                                >
                                    "Сбросить"
                                </button>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content()}
                    {filter_tags.as_ref().map(|tags| view! {
                        <div class="filter-panel-tags">{tags()}</div>
                    })}
                </div>
            </div>
        </div>
    }
}

/// Chip активного фильтра с кнопкой снятия.
#[component]
pub fn FilterTag(
    /// Текст chip'а (из filters::describe)
    #[prop(into)]
    label: String,

    /// Callback снятия фильтра
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <button
                class="filter-tag__remove"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </button>
        </div>
    }
}

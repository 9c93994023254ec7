use crate::shared::icons::icon;
use crate::shared::pagination::{page_window, PageItem, DEFAULT_MAX_VISIBLE};
use leptos::prelude::*;

/// Контролы пагинации: первая/назад, окно номеров с многоточиями,
/// вперёд/последняя, выбор размера страницы.
///
/// Окно номеров считает `page_window` — тот же расчёт, что и в подвале
/// таблицы, своей арифметики у компонента нет.
#[component]
pub fn PaginationControls(
    /// Текущая страница (с 1)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Всего страниц
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Всего записей после фильтров
    #[prop(into)]
    total_count: Signal<usize>,

    /// Размер страницы
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback смены страницы (передаётся валидный номер)
    on_page_change: Callback<usize>,

    /// Callback смены размера страницы
    on_page_size_change: Callback<usize>,

    /// Варианты размера страницы
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);

    let can_prev = move || current_page.get() > 1;
    let can_next = move || current_page.get() < total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || !can_prev()
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || !can_prev()
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>

            {move || {
                page_window(current_page.get(), total_pages.get(), DEFAULT_MAX_VISIBLE)
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(page) => {
                            let is_current = page == current_page.get();
                            view! {
                                <button
                                    class=if is_current { "pagination-btn pagination-btn--current" } else { "pagination-btn" }
                                    disabled=is_current
                                    on:click=move |_| on_page_change.run(page)
                                >
                                    {page.to_string()}
                                </button>
                            }.into_any()
                        }
                        PageItem::Ellipsis => view! {
                            <span class="pagination-ellipsis">{"\u{2026}"}</span>
                        }.into_any(),
                    })
                    .collect_view()
            }}

            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || !can_next()
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=move || !can_next()
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>

            <span class="pagination-info">
                {move || format!("Записей: {}", total_count.get())}
            </span>

            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

use crate::shared::icons::icon;
use leptos::prelude::*;

/// Страницы приложения. Роутера нет, переключение через sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Products,
}

/// Каркас приложения: шапка, sidebar с навигацией, область контента.
#[component]
#[allow(non_snake_case)]
pub fn Shell(page: RwSignal<Page>, children: ChildrenFn) -> impl IntoView {
    let nav_item = move |target: Page, icon_name: &'static str, label: &'static str| {
        view! {
            <button
                class=move || {
                    if page.get() == target {
                        "nav-item nav-item--active"
                    } else {
                        "nav-item"
                    }
                }
                on:click=move |_| page.set(target)
            >
                {icon(icon_name)}
                <span>{label}</span>
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <header class="top-header">
                <h1>{"Управление складом"}</h1>
            </header>
            <div class="app-body">
                <nav class="sidebar">
                    {nav_item(Page::Dashboard, "dashboard", "Сводка")}
                    {nav_item(Page::Products, "products", "Товары")}
                </nav>
                <main class="app-main">{children()}</main>
            </div>
        </div>
    }
}

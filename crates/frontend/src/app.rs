use crate::dashboards::d100_inventory_summary::InventoryDashboard;
use crate::domain::a001_product::ui::ProductList;
use crate::layout::{Page, Shell};
use crate::shared::fetch_cache::ApiCache;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    // Кэш ответов API один на сессию, раздаётся страницам через context
    provide_context(ApiCache::new());

    let page = RwSignal::new(Page::Dashboard);

    view! {
        <Shell page=page>
            {move || match page.get() {
                Page::Dashboard => view! { <InventoryDashboard /> }.into_any(),
                Page::Products => view! { <ProductList /> }.into_any(),
            }}
        </Shell>
    }
}

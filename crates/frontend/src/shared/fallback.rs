//! Единственный поставщик placeholder-данных.
//!
//! К нему обращается только слой api (граница с внешним бэкендом).
//! Агрегатор и классификатор не знают, настоящие данные или нет, поэтому
//! метрики fallback-набора считаются тем же `aggregate`, что и боевые.

use contracts::dashboards::d100_inventory_summary::{
    aggregate, category_breakdown, CategoryAnalytics, InventorySummary, DEFAULT_TOP_N,
};
use contracts::domain::a001_product::{Product, ProductId};
use once_cell::sync::Lazy;

static FALLBACK_PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        Product::new(ProductId::new_v4(), "Плитка керамическая 60x60 серая", "Плитка", 1250.0, 340, 50)
            .with_supplier("ООО Керамика-Трейд"),
        Product::new(ProductId::new_v4(), "Плитка мозаика 30x30 белая", "Плитка", 890.0, 12, 40)
            .with_supplier("ООО Керамика-Трейд"),
        Product::new(ProductId::new_v4(), "Раковина накладная Nano-55", "Раковины", 7400.0, 58, 10)
            .with_supplier("ИП Волков"),
        Product::new(ProductId::new_v4(), "Раковина врезная Slim-45", "Раковины", 6100.0, 0, 10)
            .with_supplier("ИП Волков"),
        Product::new(ProductId::new_v4(), "Смеситель однорычажный хром", "Смесители", 3200.0, 115, 25)
            .with_supplier("ТД Аква"),
        Product::new(ProductId::new_v4(), "Смеситель термостатический", "Смесители", 9800.0, 4, 15)
            .with_supplier("ТД Аква"),
        Product::new(ProductId::new_v4(), "Затирка эпоксидная 2кг", "Расходники", 540.0, 260, 30),
        Product::new(ProductId::new_v4(), "Крестики монтажные 2мм", "Расходники", 45.0, 900, 100),
        Product::new(ProductId::new_v4(), "Зеркало с подсветкой 80см", "Мебель", 12500.0, 7, 5)
            .with_supplier("МебельПром"),
        Product::new(ProductId::new_v4(), "Тумба подвесная 60см (снята)", "Мебель", 15400.0, 3, 5)
            .deactivated(),
    ]
});

pub fn fallback_products() -> Vec<Product> {
    FALLBACK_PRODUCTS.clone()
}

pub fn fallback_summary() -> InventorySummary {
    aggregate(&FALLBACK_PRODUCTS, DEFAULT_TOP_N)
}

pub fn fallback_categories() -> Vec<CategoryAnalytics> {
    category_breakdown(&FALLBACK_PRODUCTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::Availability;

    #[test]
    fn test_fallback_metrics_derived_not_hardcoded() {
        let summary = fallback_summary();
        assert_eq!(summary.metrics.total_products, fallback_products().len());
        // В наборе есть и низкий остаток, и нулевой — дашборд без
        // бэкенда всё равно показывает осмысленные карточки
        assert!(summary.metrics.low_stock_count > 0);
        assert!(summary.metrics.out_of_stock_count > 0);
        assert!(!summary.low_stock.is_empty());
    }

    #[test]
    fn test_fallback_has_degraded_rows() {
        let products = fallback_products();
        assert!(products.iter().any(|p| p.availability() == Availability::OutOfStock));
        assert!(products.iter().any(|p| !p.is_active));
    }

    #[test]
    fn test_fallback_categories_match_products() {
        let rows = fallback_categories();
        let total: usize = rows.iter().map(|r| r.product_count).sum();
        assert_eq!(total, fallback_products().len());
    }
}

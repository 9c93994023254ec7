use crate::domain::a001_product::{Availability, Product};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Размер подборок top-selling / low-stock по умолчанию.
pub const DEFAULT_TOP_N: usize = 10;

/// Snapshot метрик склада. Пересчитывается целиком на каждую загрузку,
/// инкрементально не патчится — иначе расходится с исходным списком.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub category_count: usize,
    pub supplier_count: usize,
    pub average_price: f64,
}

/// Метрики плюс подборки для таблиц дашборда.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub metrics: DashboardMetrics,
    pub top_selling: Vec<Product>,
    pub low_stock: Vec<Product>,
}

/// Строка аналитики по категории (endpoint category-analytics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalytics {
    pub category: String,
    pub product_count: usize,
    pub total_value: f64,
}

/// Свёртка списка товаров в snapshot дашборда.
///
/// Пустой список — валидный вход: все счётчики 0, средняя цена 0 (не NaN),
/// подборки пустые.
pub fn aggregate(products: &[Product], top_n: usize) -> InventorySummary {
    let mut categories: HashSet<&str> = HashSet::new();
    let mut suppliers: HashSet<&str> = HashSet::new();
    let mut active_products = 0usize;
    let mut low_stock_count = 0usize;
    let mut out_of_stock_count = 0usize;
    let mut price_sum = 0.0f64;

    for p in products {
        if p.is_active {
            active_products += 1;
        }
        match p.availability() {
            Availability::LowStock => low_stock_count += 1,
            Availability::OutOfStock => out_of_stock_count += 1,
            Availability::InStock => {}
        }
        categories.insert(p.category.as_str());
        if let Some(s) = p.supplier.as_deref() {
            if !s.is_empty() {
                suppliers.insert(s);
            }
        }
        price_sum += p.price;
    }

    let total_products = products.len();
    let average_price = if total_products == 0 {
        0.0
    } else {
        price_sum / total_products as f64
    };

    // Остатки с наибольшей стоимостью; при равенстве — по id, чтобы
    // результат был детерминированным
    let mut top_selling: Vec<Product> = products.to_vec();
    top_selling.sort_by(|a, b| {
        b.total_value()
            .total_cmp(&a.total_value())
            .then_with(|| a.id.cmp(&b.id))
    });
    top_selling.truncate(top_n);

    // Срочность дозаказа: сначала нулевые остатки, потом по возрастанию
    let mut low_stock: Vec<Product> = products
        .iter()
        .filter(|p| p.availability() != Availability::InStock)
        .cloned()
        .collect();
    low_stock.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.id.cmp(&b.id)));
    low_stock.truncate(top_n);

    InventorySummary {
        metrics: DashboardMetrics {
            total_products,
            active_products,
            low_stock_count,
            out_of_stock_count,
            category_count: categories.len(),
            supplier_count: suppliers.len(),
            average_price,
        },
        top_selling,
        low_stock,
    }
}

/// Клиентский расчёт строк category-analytics из списка товаров.
/// Порядок строк — по категории по возрастанию.
pub fn category_breakdown(products: &[Product]) -> Vec<CategoryAnalytics> {
    let mut by_category: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for p in products {
        let entry = by_category.entry(p.category.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += p.total_value();
    }
    by_category
        .into_iter()
        .map(|(category, (product_count, total_value))| CategoryAnalytics {
            category: category.to_string(),
            product_count,
            total_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::ProductId;

    fn product(id: &str, category: &str, price: f64, quantity: u32, min_quantity: u32) -> Product {
        Product::new(ProductId::new(id), id, category, price, quantity, min_quantity)
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[], DEFAULT_TOP_N);
        assert_eq!(summary.metrics, DashboardMetrics::default());
        assert!(summary.top_selling.is_empty());
        assert!(summary.low_stock.is_empty());
    }

    #[test]
    fn test_average_price() {
        let products = vec![
            product("a", "x", 10.0, 5, 0),
            product("b", "x", 20.0, 5, 0),
            product("c", "x", 30.0, 5, 0),
        ];
        let summary = aggregate(&products, DEFAULT_TOP_N);
        assert_eq!(summary.metrics.average_price, 20.0);
    }

    #[test]
    fn test_counts() {
        let products = vec![
            product("a", "Плитка", 10.0, 50, 5),                      // InStock
            product("b", "Плитка", 10.0, 3, 5),                       // LowStock
            product("c", "Раковины", 10.0, 0, 5),                     // OutOfStock
            product("d", "Раковины", 10.0, 50, 5).deactivated(),      // OutOfStock
            product("e", "плитка", 10.0, 50, 5).with_supplier("ООО"), // регистр различается
        ];
        let m = aggregate(&products, DEFAULT_TOP_N).metrics;
        assert_eq!(m.total_products, 5);
        assert_eq!(m.active_products, 4);
        assert_eq!(m.low_stock_count, 1);
        assert_eq!(m.out_of_stock_count, 2);
        assert_eq!(m.category_count, 3);
        assert_eq!(m.supplier_count, 1);
    }

    #[test]
    fn test_empty_supplier_not_counted() {
        let mut p = product("a", "x", 1.0, 1, 0);
        p.supplier = Some(String::new());
        let m = aggregate(&[p], DEFAULT_TOP_N).metrics;
        assert_eq!(m.supplier_count, 0);
    }

    #[test]
    fn test_top_selling_order_and_tie_break() {
        let products = vec![
            product("b", "x", 10.0, 2, 0), // value 20
            product("a", "x", 4.0, 5, 0),  // value 20, id меньше
            product("c", "x", 100.0, 1, 0), // value 100
        ];
        let summary = aggregate(&products, 2);
        let ids: Vec<&str> = summary.top_selling.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_low_stock_most_urgent_first() {
        let products = vec![
            product("a", "x", 1.0, 4, 5),  // LowStock
            product("b", "x", 1.0, 0, 5),  // OutOfStock, самый срочный
            product("c", "x", 1.0, 2, 5),  // LowStock
            product("d", "x", 1.0, 50, 5), // InStock, не попадает
        ];
        let summary = aggregate(&products, DEFAULT_TOP_N);
        let ids: Vec<&str> = summary.low_stock.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_category_breakdown() {
        let products = vec![
            product("a", "Раковины", 10.0, 2, 0),
            product("b", "Плитка", 5.0, 4, 0),
            product("c", "Плитка", 1.0, 10, 0),
        ];
        let rows = category_breakdown(&products);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Плитка");
        assert_eq!(rows[0].product_count, 2);
        assert_eq!(rows[0].total_value, 30.0);
        assert_eq!(rows[1].category, "Раковины");
        assert_eq!(rows[1].total_value, 20.0);
    }
}

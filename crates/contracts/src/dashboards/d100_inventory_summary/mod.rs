pub mod dto;

pub use dto::{
    aggregate, category_breakdown, CategoryAnalytics, DashboardMetrics, InventorySummary,
    DEFAULT_TOP_N,
};

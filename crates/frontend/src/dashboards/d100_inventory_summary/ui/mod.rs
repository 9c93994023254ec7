pub mod dashboard;

pub use dashboard::InventoryDashboard;

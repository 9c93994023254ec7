pub mod aggregate;

pub use aggregate::{classify, Availability, Product, ProductId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
// Канонический тип id — строка. Старые endpoints отдают id числом,
// поэтому десериализатор принимает оба представления.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Int(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => ProductId(s),
            Repr::Int(n) => ProductId(n.to_string()),
        })
    }
}

// ============================================================================
// Availability (derived, never stored)
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
}

impl Availability {
    /// Название статуса для отображения в списках.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::InStock => "В наличии",
            Availability::LowStock => "Заканчивается",
            Availability::OutOfStock => "Нет в наличии",
        }
    }
}

/// Статус наличия как чистая функция от (quantity, min_quantity, is_active).
///
/// Порядок правил строгий: неактивный товар или нулевой остаток всегда
/// дают `OutOfStock`, и только потом сравнение с порогом дозаказа.
pub fn classify(quantity: u32, min_quantity: u32, is_active: bool) -> Availability {
    if !is_active || quantity == 0 {
        return Availability::OutOfStock;
    }
    if quantity <= min_quantity {
        Availability::LowStock
    } else {
        Availability::InStock
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(default)]
    pub name: String,

    // Свободная строка, не закрытый enum
    #[serde(default)]
    pub category: String,

    /// Цена за единицу (продажная). Себестоимость бэкенд отдаёт
    /// отдельным полем и здесь не используется.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub quantity: u32,

    /// Порог дозаказа. Старое имя поля — thresholdValue.
    #[serde(
        rename = "minQuantity",
        alias = "thresholdValue",
        default,
        deserialize_with = "lenient_u32"
    )]
    pub min_quantity: u32,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub supplier: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "lastRestockedAt", default)]
    pub last_restocked_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Число или числовая строка; всё остальное (null, мусор) сводится к 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Str(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Num(n) if n.is_finite() => n,
        Repr::Str(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_f64(deserializer)?;
    if n <= 0.0 {
        Ok(0)
    } else {
        Ok(n as u32)
    }
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
        min_quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            min_quantity,
            is_active: true,
            supplier: None,
            created_at: None,
            updated_at: None,
            last_restocked_at: None,
        }
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Вычисляемый статус наличия. Никогда не хранится в aggregate —
    /// сохранённое значение может только кэшироваться и пересчитываться.
    pub fn availability(&self) -> Availability {
        classify(self.quantity, self.min_quantity, self.is_active)
    }

    /// Стоимость остатка: цена x количество.
    pub fn total_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.price < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_out_of_stock_wins() {
        // Нулевой остаток или неактивность важнее порога
        assert_eq!(classify(0, 50, true), Availability::OutOfStock);
        assert_eq!(classify(5, 50, false), Availability::OutOfStock);
        assert_eq!(classify(0, 0, false), Availability::OutOfStock);
    }

    #[test]
    fn test_classify_low_stock() {
        assert_eq!(classify(8, 15, true), Availability::LowStock);
        assert_eq!(classify(15, 15, true), Availability::LowStock);
        assert_eq!(classify(1, 1, true), Availability::LowStock);
    }

    #[test]
    fn test_classify_in_stock() {
        assert_eq!(classify(20, 15, true), Availability::InStock);
        assert_eq!(classify(1, 0, true), Availability::InStock);
    }

    #[test]
    fn test_product_id_accepts_string_and_number() {
        let p: Product = serde_json::from_str(r#"{"id":"abc-1","name":"X"}"#).unwrap();
        assert_eq!(p.id.as_str(), "abc-1");

        let p: Product = serde_json::from_str(r#"{"id":42,"name":"Y"}"#).unwrap();
        assert_eq!(p.id.as_str(), "42");
    }

    #[test]
    fn test_lenient_numeric_fields() {
        let json = r#"{"id":"p1","name":"X","price":"199.9","quantity":null,"minQuantity":"oops"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.price, 199.9);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.min_quantity, 0);
    }

    #[test]
    fn test_threshold_value_alias() {
        let json = r#"{"id":"p1","name":"X","quantity":4,"thresholdValue":10}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.min_quantity, 10);
        assert_eq!(p.availability(), Availability::LowStock);
    }

    #[test]
    fn test_total_value() {
        let p = Product::new(ProductId::new("p1"), "X", "Разное", 10.5, 4, 0);
        assert_eq!(p.total_value(), 42.0);
    }

    #[test]
    fn test_validate() {
        let ok = Product::new(ProductId::new("p1"), "X", "Разное", 1.0, 1, 0);
        assert!(ok.validate().is_ok());

        let bad = Product::new(ProductId::new("p2"), "  ", "Разное", 1.0, 1, 0);
        assert!(bad.validate().is_err());
    }
}

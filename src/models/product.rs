use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::serialize_cents;

/// Catalogue entry. Immutable once created; sales reference it by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price stored as integer cents (e.g. 250 = 2.50), rendered as `price`.
    #[serde(rename = "price", serialize_with = "serialize_cents")]
    pub price_cents: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    /// Decimal price, e.g. `2.50`.
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make(id: i64, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn serializes_to_wire_shape() {
        let value = serde_json::to_value(make(1, "Milk", 250)).unwrap();
        assert_eq!(value, json!({ "id": 1, "name": "Milk", "price": 2.5 }));
    }

    #[test]
    fn created_at_is_not_exposed() {
        let value = serde_json::to_value(make(3, "Bread", 199)).unwrap();
        assert!(value.get("created_at").is_none());
        assert!(value.get("price_cents").is_none());
    }

    #[test]
    fn payload_requires_name_and_price() {
        assert!(serde_json::from_value::<CreateProduct>(json!({ "name": "Eggs" })).is_err());
        assert!(serde_json::from_value::<CreateProduct>(json!({ "price": 1.0 })).is_err());

        let ok: CreateProduct =
            serde_json::from_value(json!({ "name": "Eggs", "price": 3 })).unwrap();
        assert_eq!(ok.name, "Eggs");
        assert_eq!(ok.price, 3.0);
    }
}

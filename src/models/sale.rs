use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::money::cents_to_decimal;

/// A recorded sale. `unit_price_cents` is the product price captured when the
/// sale was made and is never revisited.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// `quantity * unit_price` in cents. Widened so no stored row can overflow it.
    pub fn total_cents(&self) -> i128 {
        i128::from(self.quantity) * i128::from(self.unit_price_cents)
    }
}

// Wire shape: {id, product_id, quantity, unit_price, total, timestamp}
impl Serialize for Sale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Sale", 6)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("product_id", &self.product_id)?;
        s.serialize_field("quantity", &self.quantity)?;
        s.serialize_field("unit_price", &cents_to_decimal(self.unit_price_cents))?;
        s.serialize_field("total", &cents_to_decimal(self.total_cents()))?;
        s.serialize_field("timestamp", &self.sold_at)?;
        s.end()
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSale {
    pub product_id: i64,
    pub quantity: i64,
}

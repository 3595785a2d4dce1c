//! Order catalogue value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: u64,
    /// Display name
    pub name: String,
}

/// Sellable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: u64,
    /// Owning category identifier
    pub category_id: u64,
    /// Display name
    pub name: String,
    /// Unit price in cents
    pub price_cents: u64,
    /// Inactive products are never picked for new orders
    pub is_active: bool,
}

/// Order about to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Ordered product
    pub product_id: u64,
    /// Number of units
    pub quantity: u32,
    /// Unit price in cents at purchase time
    pub unit_price_cents: u64,
    /// `unit_price_cents * quantity`
    pub total_price_cents: u64,
    /// Customer display name
    pub customer_name: String,
    /// Customer e-mail
    pub customer_email: String,
}

/// Persisted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier assigned by the store
    pub order_id: u64,
    /// Ordered product
    pub product_id: u64,
    /// Number of units
    pub quantity: u32,
    /// Unit price in cents
    pub unit_price_cents: u64,
    /// Total price in cents
    pub total_price_cents: u64,
    /// Customer display name
    pub customer_name: String,
    /// Customer e-mail
    pub customer_email: String,
    /// Insertion time
    pub purchase_time: DateTime<Utc>,
}

impl Order {
    /// Materialize a new order with the identifier and time assigned by the store
    pub fn from_new(order_id: u64, draft: NewOrder, purchase_time: DateTime<Utc>) -> Self {
        Self {
            order_id,
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price_cents: draft.unit_price_cents,
            total_price_cents: draft.total_price_cents,
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            purchase_time,
        }
    }
}

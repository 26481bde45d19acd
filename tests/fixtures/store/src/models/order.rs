use super::product::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub note: Option<String>,
    pub metadata: HashMap<String, String>,
}

#[derive(Serialize, Deserialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum OrderStatus {
    Pending,
    Shipped { tracking: String },
    Cancelled { reason: Option<String> },
}

#[derive(Deserialize)]
pub struct CreateOrder {
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One page of results
#[derive(Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

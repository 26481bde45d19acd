use serde::{Deserialize, Serialize};

/// An item offered in the store
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    /// Display name
    pub display_name: String,
    pub price_cents: i64,
    pub tags: Vec<String>,
    pub category: Category,
    #[serde(skip)]
    pub internal_notes: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Books,
    HomeGarden,
    Toys,
}

/// A category tree node
#[derive(Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

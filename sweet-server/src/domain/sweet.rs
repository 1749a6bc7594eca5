use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sweet {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl Sweet {
    pub fn new(name: String, category: String, price: f64, quantity: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            price,
            quantity,
            created_at: Utc::now(),
        }
    }
}

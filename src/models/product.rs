use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::ValidatedFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Archived => "archived",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(format!(
                "The status must be one of active, inactive, archived; got '{}'.",
                other
            )),
        }
    }
}

/// Product owned by exactly one organization, created by exactly one user.
/// `product_id` is the business identifier used in API paths; any storage
/// primary key stays internal to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub tags: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub status: ProductStatus,
    pub quantity: i64,
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

type Setter = fn(&mut Product, &Value);

/// Declarative field-mapping table for partial updates: one `(payload key,
/// setter)` pair per updatable attribute, iterated once per merge.
const UPDATE_FIELDS: &[(&str, Setter)] = &[
    ("name", |p, v| {
        if let Some(s) = v.as_str() {
            p.name = s.to_string();
        }
    }),
    ("description", |p, v| {
        if let Some(s) = v.as_str() {
            p.description = s.to_string();
        }
    }),
    ("price", |p, v| {
        if let Some(d) = decimal_from(v) {
            p.price = d;
        }
    }),
    ("tags", |p, v| {
        if let Some(s) = v.as_str() {
            p.tags = s.to_string();
        }
    }),
    ("imageUrl", |p, v| {
        if let Some(s) = v.as_str() {
            p.image_url = Some(s.to_string());
        }
    }),
    ("slug", |p, v| {
        if let Some(s) = v.as_str() {
            p.slug = s.to_string();
        }
    }),
];

impl Product {
    /// Apply only the fields present in `validated`, leaving absent fields
    /// untouched, and stamp `updated_at` with the current time. The stamp
    /// happens even when no business field changed.
    pub fn apply_update(&mut self, validated: &ValidatedFields) {
        for (field, set) in UPDATE_FIELDS {
            if let Some(value) = validated.get(*field) {
                set(self, value);
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn is_archived(&self) -> bool {
        self.status == ProductStatus::Archived
    }
}

pub fn decimal_from(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            n.as_f64().and_then(Decimal::from_f64_retain)
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// URL-safe slug derived deterministically from a product name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

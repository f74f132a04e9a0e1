use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::envelope;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::product::{decimal_from, slugify};
use crate::models::{Product, ProductStatus};
use crate::validation::{validate, Kind, Rule};

const CREATE_RULES: &[(&str, Rule)] = &[
    ("name", Rule::required(Kind::Text)),
    ("description", Rule::required(Kind::Text)),
    ("price", Rule::required(Kind::Numeric { min: Some(0) })),
    ("status", Rule::sometimes(Kind::Text)),
    ("tags", Rule::sometimes(Kind::Text)),
    ("quantity", Rule::sometimes(Kind::Integer { min: Some(0) })),
    ("org_id", Rule::required(Kind::Text)),
];

const UPDATE_RULES: &[(&str, Rule)] = &[
    ("name", Rule::sometimes(Kind::Text)),
    ("description", Rule::sometimes(Kind::Text)),
    ("price", Rule::sometimes(Kind::Numeric { min: Some(0) })),
    ("tags", Rule::sometimes(Kind::Text)),
    ("imageUrl", Rule::sometimes(Kind::Text)),
    ("slug", Rule::sometimes(Kind::Text)),
];

/// POST /api/v1/products
///
/// The slug is always derived from the name; a supplied slug is ignored on
/// creation.
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, CREATE_RULES).map_err(ApiError::validation_failed)?;

    let org_id = validated
        .get("org_id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid organization ID"))?;

    let organization = state
        .store
        .find_organization(org_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Organization does not exist"))?;

    let status = match validated.get("status").and_then(Value::as_str) {
        Some(raw) => raw
            .parse::<ProductStatus>()
            .map_err(|msg| ApiError::validation_failed(vec![msg]))?,
        None => ProductStatus::Active,
    };

    let name = validated
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let price = validated
        .get("price")
        .and_then(decimal_from)
        .ok_or_else(|| ApiError::validation_failed(vec!["The price must be a number.".to_string()]))?;

    let now = Utc::now();
    let product = Product {
        product_id: Uuid::new_v4(),
        slug: slugify(&name),
        name,
        description: validated
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        price,
        tags: validated
            .get("tags")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image_url: None,
        status,
        quantity: validated.get("quantity").and_then(Value::as_i64).unwrap_or(0),
        org_id: organization.org_id,
        user_id: principal.user_id,
        created_at: now,
        updated_at: now,
    };

    let product = state.store.create_product(product).await?;

    Ok(envelope::created(
        "Product created successfully",
        json!({
            "product_id": product.product_id,
            "name": product.name,
            "description": product.description,
            "price": product.price,
            "status": product.status,
            "slug": product.slug,
            "tags": product.tags,
            "quantity": product.quantity,
            "org_id": product.org_id,
            "is_archived": product.is_archived(),
            "imageUrl": product.image_url,
            "user_id": product.user_id,
        }),
    ))
}

/// PUT/PATCH /api/v1/products/:id
///
/// Partial update: only supplied fields are validated and applied; the
/// update timestamp always advances.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, UPDATE_RULES).map_err(ApiError::validation_failed)?;

    // A malformed id cannot match any product
    let product_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Product not found"))?;

    let mut product = state
        .store
        .find_product(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    product.apply_update(&validated);
    state.store.save_product(&product).await?;

    Ok(envelope::success(
        StatusCode::OK,
        "Product updated successfully",
        json!({
            "product_id": product.product_id,
            "name": product.name,
            "description": product.description,
            "price": product.price,
            "tags": product.tags,
            "imageUrl": product.image_url,
            "slug": product.slug,
            "created_at": product.created_at,
            "updated_at": product.updated_at,
        }),
    ))
}

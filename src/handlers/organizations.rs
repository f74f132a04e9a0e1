use axum::{extract::State, response::Response, Extension, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::envelope;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::Organization;
use crate::validation::{validate, Kind, Rule};

const CREATE_RULES: &[(&str, Rule)] = &[
    ("name", Rule::required(Kind::Text)),
    ("description", Rule::sometimes(Kind::Text)),
    ("email", Rule::sometimes(Kind::Email)),
    ("industry", Rule::sometimes(Kind::Text)),
    ("type", Rule::sometimes(Kind::Text)),
    ("country", Rule::sometimes(Kind::Text)),
    ("state", Rule::sometimes(Kind::Text)),
    ("address", Rule::sometimes(Kind::Text)),
];

/// POST /api/v1/organizations
///
/// The creating user becomes the first member of the new organization.
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, CREATE_RULES).map_err(ApiError::validation_failed)?;

    let organization = Organization::from_validated(&validated);
    let organization = state.store.create_organization(organization).await?;
    state
        .store
        .add_member(organization.org_id, principal.user_id)
        .await?;

    Ok(envelope::created(
        "Organization created successfully",
        json!({
            "org_id": organization.org_id,
            "name": organization.name,
            "description": organization.description,
            "email": organization.email,
            "industry": organization.industry,
            "type": organization.org_type,
            "country": organization.country,
            "state": organization.state,
            "address": organization.address,
        }),
    ))
}

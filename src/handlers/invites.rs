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
use crate::config;
use crate::envelope;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::Invitation;
use crate::validation::{validate, Kind, Rule};

const CREATE_RULES: &[(&str, Rule)] = &[("email", Rule::required(Kind::Email))];

const ACCEPT_RULES: &[(&str, Rule)] = &[
    ("token", Rule::required(Kind::Text)),
    ("email", Rule::required(Kind::Email)),
];

/// POST /api/v1/organizations/:org_id/invites
pub async fn create(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, CREATE_RULES).map_err(ApiError::validation_failed)?;

    let org_id =
        Uuid::parse_str(&org_id).map_err(|_| ApiError::bad_request("Invalid organization ID"))?;
    let organization = state
        .store
        .find_organization(org_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Organization does not exist"))?;

    let email = validated
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let invitation = Invitation::issue(
        email,
        organization.org_id,
        &config::config().api.public_url,
    );
    let invitation = state.store.create_invitation(invitation).await?;

    Ok(envelope::created(
        "Invitation created successfully",
        json!({
            "invite_id": invitation.invite_id,
            "link": invitation.link,
            "email": invitation.email,
            "org_id": invitation.org_id,
            "expires_at": invitation.expires_at,
        }),
    ))
}

/// POST /api/v1/invites/accept
///
/// Single-use: the first successful acceptance marks the invitation used;
/// expired or reused invitations are rejected.
pub async fn accept(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, ACCEPT_RULES).map_err(ApiError::validation_failed)?;

    let token = validated
        .get("token")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid invitation token"))?;

    let mut invitation = state
        .store
        .find_invitation(token)
        .await?
        .ok_or_else(|| ApiError::not_found("Invitation not found"))?;

    let email = validated.get("email").and_then(Value::as_str).unwrap_or_default();
    if invitation.email != email {
        return Err(ApiError::bad_request(
            "Invitation was issued for a different email",
        ));
    }
    if invitation.used {
        return Err(ApiError::bad_request("Invitation has already been used"));
    }
    if invitation.is_expired(Utc::now()) {
        return Err(ApiError::bad_request("Invitation has expired"));
    }

    state
        .store
        .add_member(invitation.org_id, principal.user_id)
        .await?;
    invitation.used = true;
    state.store.save_invitation(&invitation).await?;

    Ok(envelope::success(
        StatusCode::OK,
        "Invitation accepted successfully",
        json!({ "org_id": invitation.org_id }),
    ))
}

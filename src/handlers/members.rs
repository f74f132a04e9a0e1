use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::envelope;
use crate::error::ApiError;
use crate::export;
use crate::models::{Organization, User};

const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// The structural format check runs before any storage lookup: a malformed
/// id answers 400 without touching the store, a well-formed unknown id 404.
fn parse_org_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid organization ID"))
}

async fn load_organization(state: &AppState, org_id: Uuid) -> Result<Organization, ApiError> {
    state
        .store
        .find_organization(org_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Organization does not exist"))
}

fn member_json(user: &User) -> Value {
    json!({
        "userId": user.user_id,
        "firstName": user.first_name(),
        "email": user.email,
        "phone": user.phone,
    })
}

/// GET /api/v1/organizations/:org_id/users - paginated member listing
pub async fn list(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let org_id = parse_org_id(&org_id)?;
    let organization = load_organization(&state, org_id).await?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let members = state.store.organization_members(organization.org_id).await?;
    let total_items = members.len() as u64;
    let total_pages = total_items.div_ceil(page_size);

    let page_members: Vec<Value> = members
        .iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .map(member_json)
        .collect();

    Ok(envelope::collection(
        "Members retrieved successfully",
        json!({
            "members": page_members,
            "pagination": {
                "currentPage": page,
                "pageSize": page_size,
                "totalPages": total_pages,
                "totalItems": total_items,
            },
        }),
    ))
}

/// GET /api/v1/members/:org_id/search?search= - substring search over member
/// name and email, case-insensitive.
pub async fn search(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let org_id = parse_org_id(&org_id)?;
    let organization = load_organization(&state, org_id).await?;

    let needle = query.search.unwrap_or_default().to_lowercase();
    let members = state.store.organization_members(organization.org_id).await?;

    let matches: Vec<Value> = members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle) || m.email.to_lowercase().contains(&needle)
        })
        .map(|m| {
            json!({
                "userId": m.user_id,
                "name": m.name,
                "email": m.email,
                "phone": m.phone,
            })
        })
        .collect();

    Ok(envelope::success(
        StatusCode::OK,
        "Users retrieved successfully",
        json!(matches),
    ))
}

/// GET /api/v1/members/:org_id/export - member CSV download.
///
/// The artifact is stored under the fixed `csv/` prefix before being
/// streamed; exporting twice on the same day overwrites the same path.
pub async fn export(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<Response, ApiError> {
    let org_id = parse_org_id(&org_id)?;
    let organization = load_organization(&state, org_id).await?;

    let members = state.store.organization_members(organization.org_id).await?;
    let export = export::export_members(&members, Utc::now().date_naive())?;

    state.files.put(&export.storage_path(), &export.bytes)?;

    let headers = [
        (header::CONTENT_TYPE, export::CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", export.file_name),
        ),
    ];

    Ok((StatusCode::OK, headers, export.bytes).into_response())
}

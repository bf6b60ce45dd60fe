//! Lead intake and inquiry administration routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use qwinnet_core::{InquiryId, InquiryStatus, UnknownStatus, ValidationError};

use super::{JsonBody, QueryParams, parse_body};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{
    CoverageInquiry, InquiryKind, NewCoverageInquiry, NewPackageInquiry, PackageInquiry,
};
use crate::services::inquiries::ListQuery;
use crate::state::AppState;

const COVERAGE_RECEIVED: &str = "Terima kasih! Tim kami akan menghubungi Anda dalam 1x24 jam";
const PACKAGE_RECEIVED: &str = "Pendaftaran berhasil! Tim kami akan menghubungi Anda segera";

/// Public intake routes, mounted behind the rate limiter.
pub fn intake_router() -> Router<AppState> {
    Router::new()
        .route("/api/coverage-check", post(submit_coverage))
        .route("/api/package-inquiry", post(submit_package))
}

/// Token-protected listing and status routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/coverage-inquiries", get(list_coverage))
        .route("/api/admin/package-inquiries", get(list_package))
        .route(
            "/api/admin/coverage-inquiry/{id}/status",
            patch(update_coverage_status),
        )
        .route(
            "/api/admin/package-inquiry/{id}/status",
            patch(update_package_status),
        )
}

// =============================================================================
// API Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CoverageReceipt {
    pub id: InquiryId,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PackageReceipt {
    pub id: InquiryId,
    pub message: &'static str,
    pub inquiry_number: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InquiryList<T> {
    pub count: usize,
    pub inquiries: Vec<T>,
}

impl<T> From<Vec<T>> for InquiryList<T> {
    fn from(inquiries: Vec<T>) -> Self {
        Self {
            count: inquiries.len(),
            inquiries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub message: &'static str,
    pub status: InquiryStatus,
}

// =============================================================================
// Handlers
// =============================================================================

#[instrument(skip_all)]
async fn submit_coverage(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<CoverageReceipt>, AppError> {
    let request: NewCoverageInquiry = parse_body(body)?;
    let inquiry = state.inquiries().submit_coverage(request).await?;

    Ok(Json(CoverageReceipt {
        id: inquiry.id,
        message: COVERAGE_RECEIVED,
        timestamp: inquiry.created_at,
    }))
}

#[instrument(skip_all)]
async fn submit_package(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<PackageReceipt>, AppError> {
    let request: NewPackageInquiry = parse_body(body)?;
    let inquiry = state.inquiries().submit_package(request).await?;

    Ok(Json(PackageReceipt {
        id: inquiry.id,
        message: PACKAGE_RECEIVED,
        inquiry_number: inquiry.inquiry_number,
        timestamp: inquiry.created_at,
    }))
}

async fn list_coverage(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<InquiryList<CoverageInquiry>>, AppError> {
    let filter = query.into_filter()?;
    let inquiries = state.inquiries().list_coverage(&filter).await?;
    Ok(Json(inquiries.into()))
}

async fn list_package(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<InquiryList<PackageInquiry>>, AppError> {
    let filter = query.into_filter()?;
    let inquiries = state.inquiries().list_package(&filter).await?;
    Ok(Json(inquiries.into()))
}

async fn update_coverage_status(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<StatusUpdated>, AppError> {
    update_status(admin, &state, InquiryKind::Coverage, &id, body).await
}

async fn update_package_status(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<StatusUpdated>, AppError> {
    update_status(admin, &state, InquiryKind::Package, &id, body).await
}

async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    state: &AppState,
    kind: InquiryKind,
    id: &str,
    body: Value,
) -> Result<Json<StatusUpdated>, AppError> {
    // An id that is not a UUID cannot name a stored inquiry.
    let id: InquiryId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("{} {id} not found", kind.label())))?;
    let update: StatusUpdate = parse_body(body)?;
    let status: InquiryStatus = update
        .status
        .parse()
        .map_err(|e: UnknownStatus| ValidationError::new("status", e.to_string()))?;

    state.inquiries().update_status(kind, id, status).await?;

    tracing::info!(
        inquiry_id = %id,
        kind = kind.label(),
        status = %status,
        admin = %admin.identity.email,
        "Inquiry status updated"
    );

    Ok(Json(StatusUpdated {
        message: "Status updated",
        status,
    }))
}

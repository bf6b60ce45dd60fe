//! Settings routes: public reads, admin reads and admin replacement.
//!
//! Public and admin reads call the same [`SettingsService::get`], so the
//! only difference between them is the access gate.
//!
//! [`SettingsService::get`]: crate::services::SettingsService::get

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;

use qwinnet_core::{
    CoverageSettings, GeneralSettings, PackagesSettings, Section, SectionType,
    TestimonialsSettings, WhyChooseSettings,
};

use super::JsonBody;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    let router = Router::new().route("/api/packages", get(public_section::<PackagesSettings>));

    let router = section::<GeneralSettings>(router);
    let router = section::<PackagesSettings>(router);
    let router = section::<TestimonialsSettings>(router);
    let router = section::<CoverageSettings>(router);
    section::<WhyChooseSettings>(router)
}

/// Mount the public and admin routes for section `S`.
fn section<S: Section>(router: Router<AppState>) -> Router<AppState> {
    let slug = S::TYPE.slug();
    router
        .route(&format!("/api/settings/{slug}"), get(public_section::<S>))
        .route(
            &format!("/api/admin/settings/{slug}"),
            get(admin_section::<S>).put(update_section::<S>),
        )
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse<S> {
    pub message: &'static str,
    pub settings: S,
}

const fn update_message(section: SectionType) -> &'static str {
    match section {
        SectionType::General => "Settings updated successfully",
        SectionType::Packages => "Packages updated successfully",
        SectionType::Testimonials => "Testimonials updated successfully",
        SectionType::Coverage => "Coverage areas updated successfully",
        SectionType::WhyChoose => "Why choose settings updated successfully",
    }
}

async fn public_section<S: Section>(State(state): State<AppState>) -> Result<Json<S>, AppError> {
    Ok(Json(state.settings().get::<S>().await?))
}

async fn admin_section<S: Section>(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<S>, AppError> {
    Ok(Json(state.settings().get::<S>().await?))
}

async fn update_section<S: Section>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<UpdateResponse<S>>, AppError> {
    let settings = state.settings().put_payload::<S>(payload).await?;

    tracing::info!(
        section = %S::TYPE,
        admin = %admin.identity.email,
        "Settings section replaced"
    );

    Ok(Json(UpdateResponse {
        message: update_message(S::TYPE),
        settings,
    }))
}

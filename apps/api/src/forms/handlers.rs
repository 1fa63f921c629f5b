use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::features::FeatureId;
use crate::forms::FormSnapshot;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpenFormRequest {
    pub feature: String,
}

/// POST /api/v1/forms
pub async fn handle_open_form(
    State(state): State<AppState>,
    Json(req): Json<OpenFormRequest>,
) -> Result<(StatusCode, Json<FormSnapshot>), AppError> {
    let feature: FeatureId = req.feature.parse()?;
    let form = state.forms.open(feature);
    Ok((StatusCode::CREATED, Json(form.snapshot())))
}

/// GET /api/v1/forms/:form_id
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<FormSnapshot>, AppError> {
    let form = state.forms.get(form_id)?;
    Ok(Json(form.snapshot()))
}

//! Axum route handlers for the feature catalog and submissions.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::CompletionResult;
use crate::errors::AppError;
use crate::features::upload::{extract_text, UploadError, UploadedFile};
use crate::features::{catalog, FeatureDescriptor, FeatureId, FeatureInput, InputModality};
use crate::forms::FormError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub input: String,
    #[serde(default)]
    pub tags: Option<String>,
    /// Existing form to submit through. A fresh form is opened when absent.
    #[serde(default)]
    pub form_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub form_id: Uuid,
    pub feature: FeatureId,
    pub result: CompletionResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/features
pub async fn handle_list_features() -> Json<&'static [FeatureDescriptor]> {
    Json(catalog())
}

/// GET /api/v1/features/:feature
pub async fn handle_get_feature(
    Path(feature): Path<String>,
) -> Result<Json<&'static FeatureDescriptor>, AppError> {
    let feature: FeatureId = feature.parse()?;
    Ok(Json(feature.descriptor()))
}

/// POST /api/v1/features/:feature/submit
///
/// Upstream failures come back as `{"outcome":"failure"}` with status 200.
/// Blank input (400) and busy forms (409) never reach the model.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(feature): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let feature: FeatureId = feature.parse()?;
    let input = FeatureInput {
        text: request.input,
        tags: request.tags,
    };
    submit_to_form(&state, feature, request.form_id, input).await
}

/// POST /api/v1/features/:feature/upload
///
/// Multipart body: a `file` part, plus optional `form_id` and `tags` text parts.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(feature): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>, AppError> {
    let feature: FeatureId = feature.parse()?;
    if feature.descriptor().input_type != InputModality::File {
        return Err(AppError::Validation(format!(
            "Feature '{feature}' does not accept file uploads"
        )));
    }

    let mut file: Option<UploadedFile> = None;
    let mut form_id: Option<Uuid> = None;
    let mut tags: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("form_id") => {
                let raw = field.text().await?;
                let id = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation(format!("Invalid form_id '{raw}'")))?;
                form_id = Some(id);
            }
            Some("tags") => tags = Some(field.text().await?),
            _ => {} // unknown parts are ignored
        }
    }

    let file = file.ok_or(UploadError::MissingFile)?;
    let text = extract_text(&file, state.max_upload_bytes)?;

    submit_to_form(&state, feature, form_id, FeatureInput { text, tags }).await
}

async fn submit_to_form(
    state: &AppState,
    feature: FeatureId,
    form_id: Option<Uuid>,
    input: FeatureInput,
) -> Result<Json<SubmitResponse>, AppError> {
    // Reject blank input before a form is opened for it.
    if input.is_blank() {
        return Err(FormError::EmptyInput.into());
    }

    let form = state.forms.resolve(form_id, feature)?;
    let result = form.submit(&state.completion, input).await?;

    Ok(Json(SubmitResponse {
        form_id: form.id(),
        feature,
        result,
    }))
}

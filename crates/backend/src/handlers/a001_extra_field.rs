use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_extra_field::{EntityType, ExtraField, ExtraFieldParameters};
use contracts::shared::api_error::ErrorResponse;

use crate::domain::a001_extra_field::service::{self, ServiceError};
use crate::shared::app_state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

fn parse_entity_type(code: &str) -> Result<EntityType, ApiError> {
    EntityType::from_code(code).ok_or_else(|| {
        error(
            StatusCode::BAD_REQUEST,
            format!("Unknown entity type '{}'", code),
        )
    })
}

impl From<ServiceError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: ServiceError) -> Self {
        let status = match e {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) | ServiceError::ReservedKey(_) => StatusCode::BAD_REQUEST,
        };
        error(status, e.to_string())
    }
}

/// GET /api/field/:entity_type
pub async fn list(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
) -> Result<Json<Vec<ExtraField>>, ApiError> {
    let entity_type = parse_entity_type(&entity_type)?;
    Ok(Json(service::list(&state.fields, entity_type).await))
}

/// POST /api/field/:entity_type/:key
pub async fn upsert(
    State(state): State<AppState>,
    Path((entity_type, key)): Path<(String, String)>,
    Json(params): Json<ExtraFieldParameters>,
) -> Result<Json<ExtraField>, ApiError> {
    let entity_type = parse_entity_type(&entity_type)?;
    match service::upsert(&state.fields, entity_type, key, params).await {
        Ok(field) => Ok(Json(field)),
        Err(e) => {
            tracing::warn!("Upsert of {} field rejected: {}", entity_type, e);
            Err(e.into())
        }
    }
}

/// DELETE /api/field/:entity_type/:key
pub async fn delete(
    State(state): State<AppState>,
    Path((entity_type, key)): Path<(String, String)>,
) -> Result<Json<Vec<ExtraField>>, ApiError> {
    let entity_type = parse_entity_type(&entity_type)?;
    service::delete(&state.fields, entity_type, &key)
        .await
        .map(Json)
        .map_err(Into::into)
}

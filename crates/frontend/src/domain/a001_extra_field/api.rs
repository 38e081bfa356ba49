use contracts::domain::a001_extra_field::{EntityType, ExtraField, ExtraFieldParameters};
use contracts::shared::api_error::ErrorResponse;
use gloo_net::http::Response;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Fetch all extra fields of an entity type
pub async fn fetch_fields(entity_type: EntityType) -> Result<Vec<ExtraField>, String> {
    let response = Request::get(&api_url(&["field", entity_type.code()]))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Vec<ExtraField>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create or update a field; returns the field as stored by the server
pub async fn upsert_field(
    entity_type: EntityType,
    key: &str,
    params: &ExtraFieldParameters,
) -> Result<ExtraField, String> {
    let response = Request::post(&api_url(&["field", entity_type.code(), key]))
        .json(params)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let message = error_message(response).await;
        log::warn!("Saving field {}/{} failed: {}", entity_type, key, message);
        return Err(message);
    }

    response
        .json::<ExtraField>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Delete a field; returns the remaining fields
pub async fn delete_field(entity_type: EntityType, key: &str) -> Result<Vec<ExtraField>, String> {
    let response = Request::delete(&api_url(&["field", entity_type.code(), key]))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let message = error_message(response).await;
        log::warn!("Deleting field {}/{} failed: {}", entity_type, key, message);
        return Err(message);
    }

    response
        .json::<Vec<ExtraField>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Server message from an error body, or the HTTP status
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => format!("HTTP {}", status),
    }
}

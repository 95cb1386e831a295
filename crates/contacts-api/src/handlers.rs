//! Request handlers, one store operation each

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use contacts_core::traits::ContactStoreExt;
use contacts_core::{Contact, ContactDraft, ContactId, Error};

use crate::AppState;
use crate::dto::{ContactPayload, DeleteResponse, ListQuery};
use crate::error::ApiError;

/// Turn a possibly rejected JSON body into a draft
fn draft_from(payload: Result<Json<ContactPayload>, JsonRejection>) -> Result<ContactDraft, Error> {
    let Json(payload) = payload.map_err(|e| Error::invalid_input(e.body_text()))?;
    ContactDraft::try_from(payload)
}

fn id_from(id: Result<Path<ContactId>, PathRejection>) -> Result<ContactId, Error> {
    let Path(id) = id.map_err(|e| Error::invalid_input(e.body_text()))?;
    Ok(id)
}

/// `GET /contacts?q=<text>`
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.store.list(query.q.as_deref()).await?;
    Ok(Json(contacts))
}

/// `POST /contacts`
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let draft = draft_from(payload)?;
    let contact = state.store.insert(draft).await?;

    tracing::info!("Created contact {}", contact.id);
    Ok((StatusCode::CREATED, Json(contact)))
}

/// `PUT /contacts/{id}`
///
/// Responds with the record as stored after the write. An unknown id is a
/// silent no-op and yields `null`.
pub async fn update_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<Option<Contact>>, ApiError> {
    let id = id_from(id)?;
    let draft = draft_from(payload)?;

    let contact = state.store.update_and_get(id, draft).await?;
    match &contact {
        Some(_) => tracing::info!("Updated contact {}", id),
        None => tracing::debug!("Update of unknown contact {} ignored", id),
    }
    Ok(Json(contact))
}

/// `DELETE /contacts/{id}`
pub async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = id_from(id)?;
    state.store.delete(id).await?;

    tracing::info!("Deleted contact {}", id);
    Ok(Json(DeleteResponse { success: true }))
}

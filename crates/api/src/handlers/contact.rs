//! Handlers for the public contact form and the admin message inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sitecms_core::contact::ContactForm;
use sitecms_core::error::CoreError;
use sitecms_core::pagination::PageInfo;
use sitecms_core::types::DbId;
use sitecms_db::models::contact_message::{ContactMessage, CreateContactMessage};
use sitecms_db::repositories::ContactMessageRepo;
use sitecms_mailer::templates::{contact_notification, ContactDetails};
use sitecms_mailer::OutgoingEmail;

use crate::error::{AppError, AppResult};
use crate::handlers::settings::active_smtp;
use crate::query::InboxParams;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ContactMessage",
        id,
    })
}

fn notification_for(message: &ContactMessage, recipient: &str) -> OutgoingEmail {
    let sender_name = message.sender_name();
    contact_notification(
        recipient,
        &ContactDetails {
            sender_name: &sender_name,
            sender_email: &message.email,
            phone: message.phone.as_deref(),
            message: &message.message,
            received_at: message.created_at,
        },
    )
}

/// Send the office notification for `message` and record it as sent.
async fn dispatch_notification(state: &AppState, message: &ContactMessage) -> AppResult<ContactMessage> {
    let (smtp, recipient) = active_smtp(&state.pool).await?;
    state
        .mailer
        .send(&smtp, notification_for(message, &recipient))
        .await?;
    ContactMessageRepo::mark_sent(&state.pool, message.id)
        .await?
        .ok_or_else(|| not_found(message.id))
}

/// POST /api/v1/contact
///
/// Stores the submission, then tries to notify the office. A failed
/// notification leaves `is_sent = false` and does not fail the request.
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let form = form.normalize()?;
    let message = ContactMessageRepo::create(&state.pool, &CreateContactMessage::from(form)).await?;
    tracing::info!(message_id = message.id, "Contact message received");

    if let Err(e) = dispatch_notification(&state, &message).await {
        tracing::warn!(message_id = message.id, error = %e, "Contact notification not sent");
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Thank you for your message. We will get back to you soon.",
        )),
    ))
}

/// GET /api/v1/admin/contact-messages?page=&limit=&filter=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<InboxParams>,
) -> AppResult<Json<PaginatedResponse<ContactMessage>>> {
    let filter = params.message_filter()?;
    let page = params.page_request();

    let (data, total) = ContactMessageRepo::list_page(&state.pool, filter, page).await?;
    tracing::debug!(
        filter = filter.as_str(),
        page = page.page,
        limit = page.limit,
        total,
        "Contact inbox listed",
    );
    Ok(Json(PaginatedResponse {
        data,
        pagination: PageInfo::new(page, total),
    }))
}

/// Body of `GET /admin/contact-messages/unread-count`.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// GET /api/v1/admin/contact-messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread = ContactMessageRepo::count_unread(&state.pool).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// GET /api/v1/admin/contact-messages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: message }))
}

/// PUT /api/v1/admin/contact-messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/v1/admin/contact-messages/{id}/send-email
///
/// Re-sends the office notification. On mail failure the message stays
/// unsent and the caller gets 502.
pub async fn send_email(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let message = ContactMessageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let message = dispatch_notification(&state, &message).await?;
    tracing::info!(message_id = id, "Contact notification sent");
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/contact-messages/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ContactMessageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

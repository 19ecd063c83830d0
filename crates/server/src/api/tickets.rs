//! Ticket API handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use ticketdesk_core::ticket::{
    DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN,
};
use ticketdesk_core::{CreateTicketRequest, Ticket, TicketPriority, TicketStatus, TicketUpdate};

use super::error::ApiError;
use super::extract::{ApiPath, ApiQuery, OptionalJson, ValidatedJson};
use super::handlers::MessageResponse;
use crate::metrics::{TICKETS_CREATED_TOTAL, TICKETS_DELETED_TOTAL, TICKET_STATUS_TRANSITIONS};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketBody {
    #[validate(length(min = TITLE_MIN_LEN, max = TITLE_MAX_LEN))]
    pub title: String,
    #[validate(length(min = DESCRIPTION_MIN_LEN, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
    /// Defaults to medium
    #[serde(default)]
    pub priority: TicketPriority,
    pub assignee: Option<String>,
}

impl From<CreateTicketBody> for CreateTicketRequest {
    fn from(body: CreateTicketBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            priority: body.priority,
            assignee: body.assignee,
        }
    }
}

/// Fields accepted by the update endpoint, either as query parameters or
/// as a JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketParams {
    pub title: Option<String>,
    pub status: Option<TicketStatus>,
    /// An empty string clears the assignee.
    pub assignee: Option<String>,
}

impl From<UpdateTicketParams> for TicketUpdate {
    fn from(params: UpdateTicketParams) -> Self {
        Self {
            title: params.title,
            status: params.status,
            assignee: params.assignee,
        }
    }
}

/// Response for ticket operations
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee: Option<String>,
    pub created_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            assignee: ticket.assignee,
            created_at: ticket.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Convert a path id into a store id.
///
/// Any integer is accepted in the path; negative ids are never issued, so
/// they are simply not found.
fn ticket_id(raw: i64) -> Result<u64, ApiError> {
    u64::try_from(raw).map_err(|_| ApiError::NotFound)
}

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateTicketBody>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state.ticket_store().create(body.into())?;

    TICKETS_CREATED_TOTAL.inc();
    info!(
        ticket_id = ticket.id,
        priority = %ticket.priority,
        "Ticket created"
    );

    Ok(Json(TicketResponse::from(ticket)))
}

/// List all tickets in creation order
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let tickets = state.ticket_store().list()?;
    Ok(Json(
        tickets.into_iter().map(TicketResponse::from).collect(),
    ))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TicketResponse>, ApiError> {
    let ticket = state.ticket_store().get(ticket_id(id)?)?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Update a ticket's title, status or assignee.
///
/// Query parameters take precedence over body fields of the same name.
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<UpdateTicketParams>,
    OptionalJson(body): OptionalJson<UpdateTicketParams>,
) -> Result<Json<TicketResponse>, ApiError> {
    let id = ticket_id(id)?;
    let update = TicketUpdate::from(params).or(body.unwrap_or_default().into());

    let updated = state.ticket_store().update_with_previous(id, update)?;

    if updated.status_changed() {
        let (from, to) = (updated.previous_status, updated.ticket.status);
        TICKET_STATUS_TRANSITIONS
            .with_label_values(&[from.as_str(), to.as_str()])
            .inc();
        info!(ticket_id = id, from = %from, to = %to, "Ticket status changed");
    }

    Ok(Json(TicketResponse::from(updated.ticket)))
}

/// Permanently delete a ticket
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ticket_id(id)?;
    state.ticket_store().delete(id)?;

    TICKETS_DELETED_TOTAL.inc();
    info!(ticket_id = id, "Ticket deleted");

    Ok(Json(MessageResponse::new("Ticket deleted")))
}

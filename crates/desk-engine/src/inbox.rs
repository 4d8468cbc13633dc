//! Ticket list and the create-ticket form.

use serde::Serialize;

use desk_core::{
    entities::Ticket,
    enums::{TicketPriority, TicketStatus},
    errors::CoreError,
    fields::{normalize_category, parse_tags},
    requests::{NewTicket, TicketFilter},
};
use desk_gateway::{GatewayError, TicketGateway};

/// Create-ticket form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub subject: String,
    pub requester_email: String,
    pub body: String,
    pub priority: TicketPriority,
    pub status: Option<TicketStatus>,
    pub category: String,
    /// Comma-separated tag text.
    pub tags: String,
}

impl TicketDraft {
    /// Validate and normalize into a create request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when subject, requester email or
    /// body is blank.
    pub fn to_request(&self) -> Result<NewTicket, CoreError> {
        let subject = required("subject", &self.subject)?;
        let requester_email = required("requester email", &self.requester_email)?;
        let body = required("body", &self.body)?;
        let tags = parse_tags(&self.tags);

        Ok(NewTicket {
            subject,
            requester_email,
            body,
            status: self.status,
            priority: Some(self.priority),
            category: normalize_category(&self.category),
            tags: (!tags.is_empty()).then_some(tags),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Why creating a ticket did not happen.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Failed to create ticket: {}", .0.detail())]
    Gateway(#[from] GatewayError),
}

/// The ticket list with its active filter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inbox {
    tickets: Vec<Ticket>,
    #[serde(skip)]
    filter: TicketFilter,
    loading: bool,
    error: Option<String>,
}

impl Inbox {
    /// Fetch tickets for `filter`. On failure the previous list stays and the
    /// error is recorded.
    pub async fn refresh<G: TicketGateway>(&mut self, gateway: &G, filter: TicketFilter) -> bool {
        self.filter = filter;
        self.loading = true;
        self.error = None;
        let result = gateway.list_tickets(&self.filter).await;
        self.loading = false;
        match result {
            Ok(tickets) => {
                tracing::debug!(count = tickets.len(), "inbox refreshed");
                self.tickets = tickets;
                true
            }
            Err(err) => {
                self.error = Some(format!("Failed to load tickets: {}", err.detail()));
                false
            }
        }
    }

    /// Validate and create a ticket, then refresh with the current filter.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::Invalid`] without contacting the backend when
    /// the draft is incomplete, or [`CreateError::Gateway`] when the create
    /// call fails (also recorded as the inbox error).
    pub async fn create<G: TicketGateway>(
        &mut self,
        gateway: &G,
        draft: &TicketDraft,
    ) -> Result<Ticket, CreateError> {
        let request = draft.to_request()?;
        self.error = None;
        match gateway.create_ticket(&request).await {
            Ok(ticket) => {
                tracing::debug!(ticket_id = ticket.id, "ticket created");
                let filter = self.filter.clone();
                self.refresh(gateway, filter).await;
                Ok(ticket)
            }
            Err(err) => {
                let err = CreateError::from(err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub const fn filter(&self) -> &TicketFilter {
        &self.filter
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Parse a status filter the way the backend does: blank means no filter.
///
/// # Errors
///
/// Returns [`CoreError::InvalidEnum`] for an unknown status.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<TicketStatus>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

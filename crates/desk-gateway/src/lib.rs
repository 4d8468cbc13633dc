//! # desk-gateway
//!
//! Typed access to the support ticket backend.
//!
//! [`TicketGateway`] is the seam the workspace engine talks through: one async
//! method per backend operation, each resolving with the typed payload or
//! failing with a [`GatewayError`]. [`HttpGateway`] implements it over
//! `reqwest`. No retries, no caching.

pub mod ai;
pub mod notes;
pub mod tickets;

mod error;
mod http;

pub use error::GatewayError;

use std::time::Duration;

use desk_config::ApiConfig;
use desk_core::{
    entities::{AiReplyDraft, AiSummary, AiTriageSuggestion, Ticket, TicketNote},
    enums::ReplyTone,
    patch::TicketPatch,
    requests::{NewNote, NewTicket, TicketFilter},
};

// ── Gateway seam ───────────────────────────────────────────────────

/// Remote operations the workspace depends on.
///
/// Futures are not required to be `Send`: the engine drives them on a
/// single-threaded runtime.
#[allow(async_fn_in_trait)]
pub trait TicketGateway {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, GatewayError>;

    async fn get_ticket(&self, id: i64) -> Result<Ticket, GatewayError>;

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, GatewayError>;

    async fn patch_ticket(&self, id: i64, patch: &TicketPatch) -> Result<Ticket, GatewayError>;

    /// Notes for a ticket, newest first.
    async fn list_notes(&self, ticket_id: i64) -> Result<Vec<TicketNote>, GatewayError>;

    async fn create_note(&self, ticket_id: i64, note: &NewNote)
    -> Result<TicketNote, GatewayError>;

    async fn triage(&self, ticket_id: i64) -> Result<AiTriageSuggestion, GatewayError>;

    async fn summarize(&self, ticket_id: i64, save_as_note: bool)
    -> Result<AiSummary, GatewayError>;

    async fn reply_draft(
        &self,
        ticket_id: i64,
        tone: ReplyTone,
    ) -> Result<AiReplyDraft, GatewayError>;
}

// ── Client ─────────────────────────────────────────────────────────

/// `reqwest`-backed gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway from API settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// Base URL every request path is joined to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl TicketGateway for HttpGateway {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, GatewayError> {
        Self::list_tickets(self, filter).await
    }

    async fn get_ticket(&self, id: i64) -> Result<Ticket, GatewayError> {
        Self::get_ticket(self, id).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, GatewayError> {
        Self::create_ticket(self, ticket).await
    }

    async fn patch_ticket(&self, id: i64, patch: &TicketPatch) -> Result<Ticket, GatewayError> {
        Self::patch_ticket(self, id, patch).await
    }

    async fn list_notes(&self, ticket_id: i64) -> Result<Vec<TicketNote>, GatewayError> {
        Self::list_notes(self, ticket_id).await
    }

    async fn create_note(
        &self,
        ticket_id: i64,
        note: &NewNote,
    ) -> Result<TicketNote, GatewayError> {
        Self::create_note(self, ticket_id, note).await
    }

    async fn triage(&self, ticket_id: i64) -> Result<AiTriageSuggestion, GatewayError> {
        Self::triage(self, ticket_id).await
    }

    async fn summarize(
        &self,
        ticket_id: i64,
        save_as_note: bool,
    ) -> Result<AiSummary, GatewayError> {
        Self::summarize(self, ticket_id, save_as_note).await
    }

    async fn reply_draft(
        &self,
        ticket_id: i64,
        tone: ReplyTone,
    ) -> Result<AiReplyDraft, GatewayError> {
        Self::reply_draft(self, ticket_id, tone).await
    }
}

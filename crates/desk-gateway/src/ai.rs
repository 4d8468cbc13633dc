//! AI assist endpoints under `/ai`.
//!
//! Each call runs a model on the backend and can take a while; the HTTP
//! client timeout bounds it.

use reqwest::Method;

use desk_core::{
    entities::{AiReplyDraft, AiSummary, AiTriageSuggestion},
    enums::ReplyTone,
    requests::{ReplyDraftRequest, SummaryRequest, TriageRequest},
};

use crate::{HttpGateway, error::GatewayError, http::require_entity};

impl HttpGateway {
    /// Ask for a triage suggestion (category, priority, tags, entities).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the backend returns a
    /// non-success status (502 when the model fails), or the body cannot be
    /// decoded.
    pub async fn triage(&self, ticket_id: i64) -> Result<AiTriageSuggestion, GatewayError> {
        let body = TriageRequest { ticket_id };
        require_entity(self.send_json(Method::POST, "/ai/triage", &body).await?)
    }

    /// Summarize a ticket, optionally persisting the summary as a note
    /// server-side.
    ///
    /// # Errors
    ///
    /// See [`Self::triage`].
    pub async fn summarize(
        &self,
        ticket_id: i64,
        save_as_note: bool,
    ) -> Result<AiSummary, GatewayError> {
        let body = SummaryRequest {
            ticket_id,
            save_as_note,
        };
        require_entity(self.send_json(Method::POST, "/ai/summary", &body).await?)
    }

    /// Draft a reply to the requester in the given tone.
    ///
    /// # Errors
    ///
    /// See [`Self::triage`].
    pub async fn reply_draft(
        &self,
        ticket_id: i64,
        tone: ReplyTone,
    ) -> Result<AiReplyDraft, GatewayError> {
        let body = ReplyDraftRequest { ticket_id, tone };
        require_entity(
            self.send_json(Method::POST, "/ai/reply-draft", &body)
                .await?,
        )
    }
}

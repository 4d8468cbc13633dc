//! Note endpoints: `/tickets/{id}/notes`.

use reqwest::Method;

use desk_core::{entities::TicketNote, requests::NewNote};

use crate::{HttpGateway, error::GatewayError, http::require_entity};

fn notes_path(ticket_id: i64) -> String {
    format!("/tickets/{ticket_id}/notes")
}

impl HttpGateway {
    /// Notes for a ticket, newest first as the backend orders them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the backend returns a
    /// non-success status, or the body cannot be decoded.
    pub async fn list_notes(&self, ticket_id: i64) -> Result<Vec<TicketNote>, GatewayError> {
        Ok(self
            .get_json(&notes_path(ticket_id))
            .await?
            .unwrap_or_default())
    }

    /// Create a note on a ticket.
    ///
    /// # Errors
    ///
    /// See [`Self::list_notes`]; a 204 yields [`GatewayError::EmptyResponse`].
    pub async fn create_note(
        &self,
        ticket_id: i64,
        note: &NewNote,
    ) -> Result<TicketNote, GatewayError> {
        require_entity(
            self.send_json(Method::POST, &notes_path(ticket_id), note)
                .await?,
        )
    }
}

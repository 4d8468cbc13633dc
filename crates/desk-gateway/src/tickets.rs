//! Ticket endpoints: `/tickets` and `/tickets/{id}`.

use reqwest::Method;

use desk_core::{
    entities::Ticket,
    patch::TicketPatch,
    requests::{NewTicket, TicketFilter},
};

use crate::{
    HttpGateway,
    error::GatewayError,
    http::require_entity,
};

/// Path for the ticket list with its query string. Unset and blank filters
/// are omitted.
#[must_use]
pub fn list_path(filter: &TicketFilter) -> String {
    let mut params = Vec::new();
    if let Some(status) = filter.status {
        params.push(format!("status={}", status.as_str()));
    }
    if let Some(query) = filter.query.as_deref().map(str::trim)
        && !query.is_empty()
    {
        params.push(format!("q={}", urlencoding::encode(query)));
    }
    if params.is_empty() {
        "/tickets".to_string()
    } else {
        format!("/tickets?{}", params.join("&"))
    }
}

impl HttpGateway {
    /// List tickets matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails, the backend returns a
    /// non-success status, or the body cannot be decoded.
    pub async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, GatewayError> {
        Ok(self
            .get_json(&list_path(filter))
            .await?
            .unwrap_or_default())
    }

    /// Fetch one ticket.
    ///
    /// # Errors
    ///
    /// See [`Self::list_tickets`]; a 204 yields [`GatewayError::EmptyResponse`].
    pub async fn get_ticket(&self, id: i64) -> Result<Ticket, GatewayError> {
        require_entity(self.get_json(&format!("/tickets/{id}")).await?)
    }

    /// Create a ticket.
    ///
    /// # Errors
    ///
    /// See [`Self::get_ticket`].
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, GatewayError> {
        require_entity(self.send_json(Method::POST, "/tickets", ticket).await?)
    }

    /// Apply a partial update and return the canonical ticket.
    ///
    /// # Errors
    ///
    /// See [`Self::get_ticket`].
    pub async fn patch_ticket(&self, id: i64, patch: &TicketPatch) -> Result<Ticket, GatewayError> {
        require_entity(
            self.send_json(Method::PATCH, &format!("/tickets/{id}"), patch)
                .await?,
        )
    }
}

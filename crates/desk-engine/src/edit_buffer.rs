//! Editable projection of a ticket's triage fields.
//!
//! The buffer holds status, priority, category and tags in their form shape
//! (category and tags as free text). It is derived from the canonical ticket
//! and committed back as one partial update.

use serde::Serialize;

use desk_core::{
    entities::Ticket,
    enums::{TicketPriority, TicketStatus},
    fields::{join_tags, normalize_category, parse_tags},
    patch::{TicketPatch, TicketPatchBuilder, TriagePatch},
};
use desk_gateway::{GatewayError, TicketGateway};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditBuffer {
    status: TicketStatus,
    priority: TicketPriority,
    category: String,
    tags: String,
}

impl EditBuffer {
    #[must_use]
    pub fn from_ticket(ticket: &Ticket) -> Self {
        let mut buffer = Self::default();
        buffer.reset_from(ticket);
        buffer
    }

    /// Overwrite every field from a canonical ticket.
    pub(crate) fn reset_from(&mut self, ticket: &Ticket) {
        self.status = ticket.status;
        self.priority = ticket.priority;
        self.category = ticket.category.clone().unwrap_or_default();
        self.tags = join_tags(&ticket.tags);
    }

    /// Merge the named triage fields, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &TriagePatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone().unwrap_or_default();
        }
        if let Some(tags) = &patch.tags {
            self.tags = join_tags(tags);
        }
    }

    /// Snapshot the buffer as a full triage update.
    ///
    /// Blank category text becomes an explicit clear; tag text goes through
    /// [`parse_tags`].
    #[must_use]
    pub fn commit(&self) -> Commit {
        let patch = TicketPatchBuilder::new()
            .status(self.status)
            .priority(self.priority)
            .category(normalize_category(&self.category))
            .tags(parse_tags(&self.tags))
            .build();
        Commit { patch }
    }

    pub const fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }

    pub const fn set_priority(&mut self, priority: TicketPriority) {
        self.priority = priority;
    }

    pub fn set_category_text(&mut self, text: impl Into<String>) {
        self.category = text.into();
    }

    pub fn set_tags_text(&mut self, text: impl Into<String>) {
        self.tags = text.into();
    }

    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    #[must_use]
    pub const fn priority(&self) -> TicketPriority {
        self.priority
    }

    #[must_use]
    pub fn category_text(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn tags_text(&self) -> &str {
        &self.tags
    }
}

/// A buffer snapshot ready to send. Owns its patch, so sending holds no
/// borrow of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    patch: TicketPatch,
}

impl Commit {
    /// A commit carrying only the fields a triage patch names.
    #[must_use]
    pub fn partial(patch: TriagePatch) -> Self {
        Self {
            patch: patch.into(),
        }
    }

    #[must_use]
    pub const fn patch(&self) -> &TicketPatch {
        &self.patch
    }

    /// Send the snapshot as `PATCH /tickets/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure unchanged.
    pub async fn send<G: TicketGateway>(
        &self,
        gateway: &G,
        ticket_id: i64,
    ) -> Result<Ticket, GatewayError> {
        gateway.patch_ticket(ticket_id, &self.patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ticket;
    use desk_core::patch::TriagePatchBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn reset_from_renders_form_text() {
        let mut t = ticket(1);
        t.category = Some("AUTH".into());
        t.tags = vec!["login".into(), "sev2".into()];
        let buffer = EditBuffer::from_ticket(&t);
        assert_eq!(buffer.category_text(), "AUTH");
        assert_eq!(buffer.tags_text(), "login, sev2");
        assert_eq!(buffer.status(), t.status);
    }

    #[test]
    fn missing_category_renders_blank() {
        let buffer = EditBuffer::from_ticket(&ticket(1));
        assert_eq!(buffer.category_text(), "");
        assert_eq!(buffer.tags_text(), "");
    }

    #[test]
    fn commit_normalizes_fields() {
        let mut buffer = EditBuffer::from_ticket(&ticket(1));
        buffer.set_status(TicketStatus::InProgress);
        buffer.set_category_text("  BILLING ");
        buffer.set_tags_text("login, , sev2 ,");
        let patch = buffer.commit().patch().clone();
        assert_eq!(patch.status, Some(TicketStatus::InProgress));
        assert_eq!(patch.category, Some(Some("BILLING".to_string())));
        assert_eq!(patch.tags, Some(vec!["login".to_string(), "sev2".to_string()]));
        assert!(patch.subject.is_none());
        assert!(patch.body.is_none());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_category_commits_explicit_clear(#[case] text: &str) {
        let mut t = ticket(1);
        t.category = Some("AUTH".into());
        let mut buffer = EditBuffer::from_ticket(&t);
        buffer.set_category_text(text);
        assert_eq!(buffer.commit().patch().category, Some(None));
    }

    #[test]
    fn apply_patch_touches_only_named_fields() {
        let mut t = ticket(1);
        t.tags = vec!["a".into()];
        let mut buffer = EditBuffer::from_ticket(&t);
        let before = buffer.clone();

        buffer.apply_patch(
            &TriagePatchBuilder::new()
                .category(Some("AUTH".into()))
                .build(),
        );
        assert_eq!(buffer.category_text(), "AUTH");
        assert_eq!(buffer.priority(), before.priority());
        assert_eq!(buffer.tags_text(), before.tags_text());
        assert_eq!(buffer.status(), before.status());
    }

    #[test]
    fn apply_patch_can_clear_category() {
        let mut t = ticket(1);
        t.category = Some("AUTH".into());
        let mut buffer = EditBuffer::from_ticket(&t);
        buffer.apply_patch(&TriagePatchBuilder::new().category(None).build());
        assert_eq!(buffer.category_text(), "");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut buffer = EditBuffer::from_ticket(&ticket(1));
        buffer.set_tags_text("draft, tags");
        let before = buffer.clone();
        buffer.apply_patch(&TriagePatch::default());
        assert_eq!(buffer, before);
    }

    #[test]
    fn partial_commit_names_only_patched_fields() {
        let commit = Commit::partial(
            TriagePatchBuilder::new()
                .priority(TicketPriority::Urgent)
                .build(),
        );
        let patch = commit.patch();
        assert_eq!(patch.priority, Some(TicketPriority::Urgent));
        assert!(patch.status.is_none());
        assert!(patch.category.is_none());
        assert!(patch.tags.is_none());
    }
}

//! Newest-first notes for one ticket.

use serde::Serialize;

use desk_core::entities::{AiSummary, TicketNote};

/// Ordered notes for the active ticket, most recent first.
///
/// There is no de-duplication: a created note must reach the timeline either
/// through [`Self::prepend`] or through a full reload, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NotesTimeline {
    notes: Vec<TicketNote>,
}

impl NotesTimeline {
    /// Replace every note with the server's list, keeping its order.
    pub fn replace(&mut self, notes: Vec<TicketNote>) {
        self.notes = notes;
    }

    /// Insert a freshly created note at the head.
    pub fn prepend(&mut self, note: TicketNote) {
        self.notes.insert(0, note);
    }

    /// Whether a summary response means the server created a note, so the
    /// timeline must be reloaded rather than prepended to.
    #[must_use]
    pub const fn needs_reload(summary: &AiSummary) -> bool {
        summary.is_saved()
    }

    #[must_use]
    pub fn notes(&self) -> &[TicketNote] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, note_id: i64) -> bool {
        self.notes.iter().any(|n| n.id == note_id)
    }
}

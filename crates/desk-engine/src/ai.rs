//! AI assist workflows: triage suggestion, summary, and reply draft.
//!
//! Each workflow owns a [`WorkflowSlot`] so that one in-flight or failed run
//! never blocks or clears another. The gateway calls themselves are driven by
//! the workspace; this module holds the slot state and the pure translations
//! (suggestion to patch, summary to note text).

use serde::Serialize;

use desk_core::{
    entities::{AiReplyDraft, AiSummary, AiTriageSuggestion},
    enums::SuggestionPart,
    patch::{TriagePatch, TriagePatchBuilder},
};

// ---------------------------------------------------------------------------
// WorkflowSlot
// ---------------------------------------------------------------------------

/// Loading flag, error message and last good result of one workflow.
///
/// `revision` increases each time a new result is stored, so a late
/// completion can tell whether the result it started from is still shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSlot<T> {
    loading: bool,
    error: Option<String>,
    result: Option<T>,
    revision: u64,
}

impl<T> Default for WorkflowSlot<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            result: None,
            revision: 0,
        }
    }
}

impl<T> WorkflowSlot<T> {
    /// Mark the workflow as running. Returns `false` if it already is.
    pub(crate) fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub(crate) const fn finish(&mut self) {
        self.loading = false;
    }

    /// Store a new result, replacing the previous one.
    pub(crate) fn succeed(&mut self, value: T) {
        self.result = Some(value);
        self.revision += 1;
        self.error = None;
    }

    /// Record a failure. The previous result stays.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) const fn result_mut(&mut self) -> Option<&mut T> {
        self.result.as_mut()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

// ---------------------------------------------------------------------------
// AiCoordinator
// ---------------------------------------------------------------------------

/// AI workflow state for one ticket session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AiCoordinator {
    pub(crate) triage: WorkflowSlot<AiTriageSuggestion>,
    pub(crate) summary: WorkflowSlot<AiSummary>,
    /// A client-side "save summary as note" is in flight.
    pub(crate) summary_saving: bool,
    pub(crate) reply: WorkflowSlot<AiReplyDraft>,
    /// Editable reply text, seeded from each new draft.
    pub(crate) reply_text: String,
    pub(crate) copied: bool,
    /// Last clipboard failure, kept apart from draft generation errors.
    pub(crate) copy_error: Option<String>,
}

impl AiCoordinator {
    #[must_use]
    pub const fn triage(&self) -> &WorkflowSlot<AiTriageSuggestion> {
        &self.triage
    }

    #[must_use]
    pub const fn summary(&self) -> &WorkflowSlot<AiSummary> {
        &self.summary
    }

    #[must_use]
    pub const fn reply(&self) -> &WorkflowSlot<AiReplyDraft> {
        &self.reply
    }

    #[must_use]
    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    #[must_use]
    pub const fn copied(&self) -> bool {
        self.copied
    }

    #[must_use]
    pub fn copy_error(&self) -> Option<&str> {
        self.copy_error.as_deref()
    }

    /// Whether the displayed summary can still be saved as a note.
    #[must_use]
    pub fn can_save_summary(&self) -> bool {
        !self.summary_saving
            && self
                .summary
                .result()
                .is_some_and(|summary| !summary.is_saved())
    }

    pub(crate) fn store_reply(&mut self, draft: AiReplyDraft) {
        self.reply_text.clone_from(&draft.draft);
        self.copied = false;
        self.reply.succeed(draft);
    }

    /// Drop the reply draft and its editable text.
    pub(crate) fn clear_reply(&mut self) {
        self.reply = WorkflowSlot {
            loading: self.reply.loading,
            ..WorkflowSlot::default()
        };
        self.reply_text.clear();
        self.copied = false;
        self.copy_error = None;
    }
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

/// Build the triage patch for one part of a suggestion.
///
/// Only fields the part names are set. A suggestion without a category or
/// priority leaves that field untouched rather than clearing it.
#[must_use]
pub fn suggestion_patch(suggestion: &AiTriageSuggestion, part: SuggestionPart) -> TriagePatch {
    let mut builder = TriagePatchBuilder::new();
    if part.includes_category()
        && let Some(category) = &suggestion.category
    {
        builder = builder.category(Some(category.clone()));
    }
    if part.includes_priority()
        && let Some(priority) = suggestion.priority
    {
        builder = builder.priority(priority);
    }
    if part.includes_tags() {
        builder = builder.tags(suggestion.tags.clone());
    }
    builder.build()
}

/// Render a summary as note text.
///
/// ```text
/// AI Summary — {subject}
///
/// {summary}
///
/// Key points:
/// - {point}
/// ```
///
/// The title drops the subject when it is blank and the key point block is
/// omitted when no point has text.
#[must_use]
pub fn format_summary_note(subject: &str, summary: &AiSummary) -> String {
    let subject = subject.trim();
    let mut lines = vec![
        if subject.is_empty() {
            "AI Summary".to_string()
        } else {
            format!("AI Summary — {subject}")
        },
        String::new(),
        summary.summary.trim().to_string(),
    ];

    let points: Vec<&str> = summary
        .key_points
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !points.is_empty() {
        lines.push(String::new());
        lines.push("Key points:".to_string());
        lines.extend(points.iter().map(|p| format!("- {p}")));
    }

    lines.join("\n").trim().to_string()
}

//! Per-ticket workspace controller.
//!
//! A [`Workspace`] owns at most one ticket session: the canonical ticket, its
//! edit buffer, notes timeline, note draft and AI workflow state. Opening a
//! different ticket replaces the session wholesale.
//!
//! Methods take `&self` and may run concurrently on one thread (for example
//! under `tokio::join!` on a current-thread runtime). Session state lives in a
//! `RefCell` that is never borrowed across an `.await`. Every operation
//! records the session generation before its gateway call and drops the
//! response as [`Outcome::Stale`] if the active session changed meanwhile.

use std::cell::RefCell;

use serde::Serialize;

use desk_core::{
    entities::{AiSummary, Ticket, TicketNote},
    enums::{NoteKind, ReplyTone, SuggestionPart, TicketPriority, TicketStatus},
    requests::NewNote,
};
use desk_gateway::{GatewayError, TicketGateway};

use crate::{
    ai::{AiCoordinator, format_summary_note, suggestion_patch},
    clipboard::ClipboardChain,
    edit_buffer::{Commit, EditBuffer},
    timeline::NotesTimeline,
};

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum Outcome {
    /// The result was applied to the session.
    Applied,
    /// Nothing was sent; the session is unchanged.
    Rejected(Rejection),
    /// The request failed; the message is in the relevant error slot.
    Failed,
    /// The response arrived after the session changed and was discarded.
    Stale,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// No ticket is open, or it has not finished loading.
    NotReady,
    /// The same workflow is already running.
    Busy,
    /// A ticket-field write (save or apply) is already outstanding.
    WriteInFlight,
    NoSuggestion,
    NoSummary,
    /// The displayed summary already exists as a note.
    AlreadySaved,
    EmptyNote,
    NothingToCopy,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotReady => "no ticket loaded",
            Self::Busy => "already running",
            Self::WriteInFlight => "another save is in flight",
            Self::NoSuggestion => "no triage suggestion to apply",
            Self::NoSummary => "no summary to save",
            Self::AlreadySaved => "summary already saved as a note",
            Self::EmptyNote => "note is empty",
            Self::NothingToCopy => "reply draft is empty",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unloaded,
    Loading,
    Ready,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Session {
    ticket_id: i64,
    phase: Phase,
    error: Option<String>,
    ticket: Option<Ticket>,
    buffer: EditBuffer,
    timeline: NotesTimeline,
    note_draft: String,
    writing: bool,
    adding_note: bool,
    ai: AiCoordinator,
}

impl Session {
    fn new(ticket_id: i64) -> Self {
        Self {
            ticket_id,
            phase: Phase::Loading,
            error: None,
            ticket: None,
            buffer: EditBuffer::default(),
            timeline: NotesTimeline::default(),
            note_draft: String::new(),
            writing: false,
            adding_note: false,
            ai: AiCoordinator::default(),
        }
    }

    fn is_ready(&self) -> bool {
        self.phase == Phase::Ready && self.ticket.is_some()
    }

    /// Install a server-confirmed ticket and re-derive the buffer from it.
    fn accept_ticket(&mut self, ticket: Ticket) {
        self.buffer.reset_from(&ticket);
        self.ticket = Some(ticket);
    }

    fn release(&mut self, busy: Busy) {
        match busy {
            Busy::Write => self.writing = false,
            Busy::Note => self.adding_note = false,
            Busy::SummarySave => self.ai.summary_saving = false,
            Busy::Triage => self.ai.triage.finish(),
            Busy::Summary => self.ai.summary.finish(),
            Busy::Reply => self.ai.reply.finish(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    /// Bumped whenever a different ticket is opened or the view is closed.
    generation: u64,
    /// Bumped on every load so overlapping loads of one ticket settle newest-wins.
    load_seq: u64,
    session: Option<Session>,
}

impl State {
    fn current(&mut self, generation: u64) -> Option<&mut Session> {
        if self.generation == generation {
            self.session.as_mut()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Busy {
    Write,
    Note,
    SummarySave,
    Triage,
    Summary,
    Reply,
}

/// Clears a busy flag when the operation ends, including when its future is
/// dropped mid-flight. A flag that belongs to a replaced session is left alone.
struct BusyGuard<'a> {
    state: &'a RefCell<State>,
    generation: u64,
    busy: Busy,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut()
            && let Some(session) = state.current(self.generation)
        {
            session.release(self.busy);
        }
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Serializable snapshot of the whole workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceView {
    pub phase: Phase,
    pub ticket_id: Option<i64>,
    pub error: Option<String>,
    pub ticket: Option<Ticket>,
    pub buffer: EditBuffer,
    pub notes: Vec<TicketNote>,
    pub note_draft: String,
    pub saving: bool,
    pub adding_note: bool,
    pub ai: AiCoordinator,
    pub can_save_summary: bool,
}

impl WorkspaceView {
    fn unloaded() -> Self {
        Self {
            phase: Phase::Unloaded,
            ticket_id: None,
            error: None,
            ticket: None,
            buffer: EditBuffer::default(),
            notes: Vec::new(),
            note_draft: String::new(),
            saving: false,
            adding_note: false,
            ai: AiCoordinator::default(),
            can_save_summary: false,
        }
    }
}

fn failure(context: &str, err: &GatewayError) -> String {
    format!("{context}: {}", err.detail())
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

pub struct Workspace<G> {
    gateway: G,
    clipboard: ClipboardChain,
    state: RefCell<State>,
}

impl<G: TicketGateway> Workspace<G> {
    #[must_use]
    pub fn new(gateway: G, clipboard: ClipboardChain) -> Self {
        Self {
            gateway,
            clipboard,
            state: RefCell::new(State::default()),
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Begin a busy section on the current session, if `check` allows it.
    fn enter<F>(&self, busy: Busy, check: F) -> Result<(BusyGuard<'_>, i64), Rejection>
    where
        F: FnOnce(&mut Session) -> Result<(), Rejection>,
    {
        let mut state = self.state.borrow_mut();
        let generation = state.generation;
        let session = state.session.as_mut().ok_or(Rejection::NotReady)?;
        check(session)?;
        let ticket_id = session.ticket_id;
        drop(state);
        Ok((
            BusyGuard {
                state: &self.state,
                generation,
                busy,
            },
            ticket_id,
        ))
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Open `ticket_id`, fetching the ticket and then its notes.
    ///
    /// Opening a different ticket discards the previous session, including
    /// AI results and unsaved edits. Reloading the open ticket keeps triage
    /// and summary results but resets the reply draft.
    pub async fn load(&self, ticket_id: i64) -> Outcome {
        let (generation, seq) = {
            let mut state = self.state.borrow_mut();
            let same_ticket = state
                .session
                .as_ref()
                .is_some_and(|s| s.ticket_id == ticket_id);
            if same_ticket {
                if let Some(session) = state.session.as_mut() {
                    session.phase = Phase::Loading;
                    session.error = None;
                    session.ai.clear_reply();
                }
            } else {
                state.generation += 1;
                state.session = Some(Session::new(ticket_id));
                tracing::debug!(ticket_id, generation = state.generation, "session opened");
            }
            state.load_seq += 1;
            (state.generation, state.load_seq)
        };

        let ticket = self.gateway.get_ticket(ticket_id).await;
        {
            let mut state = self.state.borrow_mut();
            if state.load_seq != seq {
                tracing::debug!(ticket_id, "superseded ticket load discarded");
                return Outcome::Stale;
            }
            let Some(session) = state.current(generation) else {
                tracing::debug!(ticket_id, "stale ticket load discarded");
                return Outcome::Stale;
            };
            match ticket {
                Ok(ticket) => session.accept_ticket(ticket),
                Err(err) => {
                    session.phase = Phase::Ready;
                    session.error = Some(failure("Failed to load ticket", &err));
                    return Outcome::Failed;
                }
            }
        }

        let notes = self.gateway.list_notes(ticket_id).await;
        let mut state = self.state.borrow_mut();
        if state.load_seq != seq {
            return Outcome::Stale;
        }
        let Some(session) = state.current(generation) else {
            tracing::debug!(ticket_id, "stale notes load discarded");
            return Outcome::Stale;
        };
        session.phase = Phase::Ready;
        match notes {
            Ok(notes) => {
                session.timeline.replace(notes);
                tracing::debug!(ticket_id, notes = session.timeline.len(), "session ready");
                Outcome::Applied
            }
            Err(err) => {
                session.error = Some(failure("Failed to load notes", &err));
                Outcome::Failed
            }
        }
    }

    /// Reload the open ticket.
    pub async fn reload(&self) -> Outcome {
        let ticket_id = self.state.borrow().session.as_ref().map(|s| s.ticket_id);
        match ticket_id {
            Some(id) => self.load(id).await,
            None => Outcome::Rejected(Rejection::NotReady),
        }
    }

    /// Tear down the session. Pending responses become stale.
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.session = None;
    }

    // ── Ticket fields ────────────────────────────────────────────────

    /// Commit the edit buffer. On failure the buffer keeps the user's edits.
    pub async fn save(&self) -> Outcome {
        let mut commit = None;
        let (guard, ticket_id) = match self.enter(Busy::Write, |session| {
            if !session.is_ready() {
                return Err(Rejection::NotReady);
            }
            if session.writing {
                return Err(Rejection::WriteInFlight);
            }
            session.writing = true;
            session.error = None;
            commit = Some(session.buffer.commit());
            Ok(())
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };
        let Some(commit) = commit else {
            return Outcome::Rejected(Rejection::NotReady);
        };

        let result = commit.send(&self.gateway, ticket_id).await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            tracing::debug!(ticket_id, "stale save discarded");
            return Outcome::Stale;
        };
        match result {
            Ok(ticket) => {
                session.accept_ticket(ticket);
                Outcome::Applied
            }
            Err(err) => {
                session.error = Some(failure("Failed to save", &err));
                Outcome::Failed
            }
        }
    }

    fn edit_buffer(&self, edit: impl FnOnce(&mut EditBuffer)) -> Outcome {
        let mut state = self.state.borrow_mut();
        match state.session.as_mut() {
            Some(session) if session.is_ready() => {
                edit(&mut session.buffer);
                Outcome::Applied
            }
            _ => Outcome::Rejected(Rejection::NotReady),
        }
    }

    pub fn set_status(&self, status: TicketStatus) -> Outcome {
        self.edit_buffer(|buffer| buffer.set_status(status))
    }

    pub fn set_priority(&self, priority: TicketPriority) -> Outcome {
        self.edit_buffer(|buffer| buffer.set_priority(priority))
    }

    pub fn set_category_text(&self, text: &str) -> Outcome {
        self.edit_buffer(|buffer| buffer.set_category_text(text))
    }

    pub fn set_tags_text(&self, text: &str) -> Outcome {
        self.edit_buffer(|buffer| buffer.set_tags_text(text))
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn set_note_draft(&self, text: &str) -> Outcome {
        let mut state = self.state.borrow_mut();
        match state.session.as_mut() {
            Some(session) => {
                text.clone_into(&mut session.note_draft);
                Outcome::Applied
            }
            None => Outcome::Rejected(Rejection::NotReady),
        }
    }

    /// Create a note from the draft and prepend it. A blank draft is a no-op.
    pub async fn add_note(&self) -> Outcome {
        let mut body = String::new();
        let (guard, ticket_id) = match self.enter(Busy::Note, |session| {
            let trimmed = session.note_draft.trim();
            if trimmed.is_empty() {
                return Err(Rejection::EmptyNote);
            }
            if session.adding_note {
                return Err(Rejection::Busy);
            }
            trimmed.clone_into(&mut body);
            session.adding_note = true;
            session.error = None;
            Ok(())
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };

        let result = self
            .gateway
            .create_note(ticket_id, &NewNote::new(NoteKind::Note, body))
            .await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            return Outcome::Stale;
        };
        match result {
            Ok(note) => {
                session.timeline.prepend(note);
                session.note_draft.clear();
                Outcome::Applied
            }
            Err(err) => {
                session.error = Some(failure("Failed to add note", &err));
                Outcome::Failed
            }
        }
    }

    // ── AI: triage ───────────────────────────────────────────────────

    pub async fn run_triage(&self) -> Outcome {
        let (guard, ticket_id) = match self.enter(Busy::Triage, |session| {
            if session.ticket.is_none() {
                return Err(Rejection::NotReady);
            }
            if session.ai.triage.begin() {
                Ok(())
            } else {
                Err(Rejection::Busy)
            }
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };

        let result = self.gateway.triage(ticket_id).await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            tracing::debug!(ticket_id, "stale triage suggestion discarded");
            return Outcome::Stale;
        };
        match result {
            Ok(suggestion) => {
                session.ai.triage.succeed(suggestion);
                Outcome::Applied
            }
            Err(err) => {
                session.ai.triage.fail(failure("AI triage failed", &err));
                Outcome::Failed
            }
        }
    }

    /// Apply part of the displayed suggestion to the edit buffer and send
    /// only the fields that part names. The suggestion stays displayed.
    pub async fn apply_suggestion(&self, part: SuggestionPart) -> Outcome {
        let mut commit = None;
        let (guard, ticket_id) = match self.enter(Busy::Write, |session| {
            if !session.is_ready() {
                return Err(Rejection::NotReady);
            }
            let suggestion = session
                .ai
                .triage
                .result()
                .ok_or(Rejection::NoSuggestion)?;
            if session.writing {
                return Err(Rejection::WriteInFlight);
            }
            let patch = suggestion_patch(suggestion, part);
            session.buffer.apply_patch(&patch);
            session.writing = true;
            session.error = None;
            commit = Some(Commit::partial(patch));
            Ok(())
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };
        let Some(commit) = commit else {
            return Outcome::Rejected(Rejection::NotReady);
        };

        let result = commit.send(&self.gateway, ticket_id).await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            return Outcome::Stale;
        };
        match result {
            Ok(ticket) => {
                session.accept_ticket(ticket);
                Outcome::Applied
            }
            Err(err) => {
                session.error = Some(failure("Failed to apply AI suggestion", &err));
                Outcome::Failed
            }
        }
    }

    // ── AI: summary ──────────────────────────────────────────────────

    /// Summarize the ticket. When the server reports it saved the summary as
    /// a note, the notes timeline is reloaded so the note appears.
    pub async fn run_summary(&self, save_as_note: bool) -> Outcome {
        let (guard, ticket_id) = match self.enter(Busy::Summary, |session| {
            if session.ticket.is_none() {
                return Err(Rejection::NotReady);
            }
            if session.ai.summary.begin() {
                Ok(())
            } else {
                Err(Rejection::Busy)
            }
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };

        let result = self.gateway.summarize(ticket_id, save_as_note).await;
        let reload = {
            let mut state = self.state.borrow_mut();
            let Some(session) = state.current(guard.generation) else {
                tracing::debug!(ticket_id, "stale summary discarded");
                return Outcome::Stale;
            };
            match result {
                Ok(summary) => {
                    let reload = NotesTimeline::needs_reload(&summary);
                    session.ai.summary.succeed(summary);
                    reload
                }
                Err(err) => {
                    session.ai.summary.fail(failure("AI summary failed", &err));
                    return Outcome::Failed;
                }
            }
        };
        if !reload {
            return Outcome::Applied;
        }

        let notes = self.gateway.list_notes(ticket_id).await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            return Outcome::Stale;
        };
        match notes {
            Ok(notes) => {
                session.timeline.replace(notes);
                Outcome::Applied
            }
            Err(err) => {
                session
                    .ai
                    .summary
                    .fail(failure("Summary saved, but reloading notes failed", &err));
                Outcome::Failed
            }
        }
    }

    /// Save the displayed summary as an `ai_summary` note without another
    /// model call. A summary that is already saved is left alone.
    pub async fn save_summary_as_note(&self) -> Outcome {
        let mut pending: Option<(String, u64)> = None;
        let (guard, ticket_id) = match self.enter(Busy::SummarySave, |session| {
            let Some(ticket) = session.ticket.as_ref() else {
                return Err(Rejection::NotReady);
            };
            let summary: &AiSummary = session.ai.summary.result().ok_or(Rejection::NoSummary)?;
            if summary.is_saved() {
                return Err(Rejection::AlreadySaved);
            }
            if session.ai.summary_saving {
                return Err(Rejection::Busy);
            }
            pending = Some((
                format_summary_note(&ticket.subject, summary),
                session.ai.summary.revision(),
            ));
            session.ai.summary_saving = true;
            session.error = None;
            Ok(())
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };
        let Some((body, revision)) = pending else {
            return Outcome::Rejected(Rejection::NoSummary);
        };

        let result = self
            .gateway
            .create_note(ticket_id, &NewNote::new(NoteKind::AiSummary, body))
            .await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            return Outcome::Stale;
        };
        match result {
            Ok(note) => {
                let note_id = note.id;
                session.timeline.prepend(note);
                if session.ai.summary.revision() == revision
                    && let Some(summary) = session.ai.summary.result_mut()
                {
                    summary.saved_note_id = Some(note_id);
                }
                Outcome::Applied
            }
            Err(err) => {
                session.error = Some(failure("Failed to save AI summary as note", &err));
                Outcome::Failed
            }
        }
    }

    // ── AI: reply draft ──────────────────────────────────────────────

    /// Generate a reply draft. A new draft replaces the editable text,
    /// including any unsaved edits.
    pub async fn run_reply_draft(&self, tone: ReplyTone) -> Outcome {
        let (guard, ticket_id) = match self.enter(Busy::Reply, |session| {
            if session.ticket.is_none() {
                return Err(Rejection::NotReady);
            }
            if session.ai.reply.begin() {
                session.ai.copied = false;
                Ok(())
            } else {
                Err(Rejection::Busy)
            }
        }) {
            Ok(entered) => entered,
            Err(rejection) => return Outcome::Rejected(rejection),
        };

        let result = self.gateway.reply_draft(ticket_id, tone).await;
        let mut state = self.state.borrow_mut();
        let Some(session) = state.current(guard.generation) else {
            return Outcome::Stale;
        };
        match result {
            Ok(draft) => {
                session.ai.store_reply(draft);
                Outcome::Applied
            }
            Err(err) => {
                session.ai.reply.fail(failure("AI reply draft failed", &err));
                Outcome::Failed
            }
        }
    }

    pub fn set_reply_text(&self, text: &str) -> Outcome {
        let mut state = self.state.borrow_mut();
        match state.session.as_mut() {
            Some(session) => {
                text.clone_into(&mut session.ai.reply_text);
                session.ai.copied = false;
                Outcome::Applied
            }
            None => Outcome::Rejected(Rejection::NotReady),
        }
    }

    /// Copy the trimmed reply text through the clipboard chain.
    pub fn copy_reply_draft(&self) -> Outcome {
        let text = {
            let state = self.state.borrow();
            let Some(session) = state.session.as_ref() else {
                return Outcome::Rejected(Rejection::NotReady);
            };
            session.ai.reply_text.trim().to_string()
        };
        if text.is_empty() {
            return Outcome::Rejected(Rejection::NothingToCopy);
        }

        let result = self.clipboard.copy(&text);
        let mut state = self.state.borrow_mut();
        let Some(session) = state.session.as_mut() else {
            return Outcome::Stale;
        };
        match result {
            Ok(strategy) => {
                tracing::debug!(strategy, "reply draft copied");
                session.ai.copied = true;
                session.ai.copy_error = None;
                Outcome::Applied
            }
            Err(err) => {
                tracing::debug!(%err, "reply draft copy failed");
                session.ai.copied = false;
                session.ai.copy_error = Some(format!("Copy failed: {err}"));
                Outcome::Failed
            }
        }
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    #[must_use]
    pub fn view(&self) -> WorkspaceView {
        let state = self.state.borrow();
        let Some(session) = state.session.as_ref() else {
            return WorkspaceView::unloaded();
        };
        WorkspaceView {
            phase: session.phase,
            ticket_id: Some(session.ticket_id),
            error: session.error.clone(),
            ticket: session.ticket.clone(),
            buffer: session.buffer.clone(),
            notes: session.timeline.notes().to_vec(),
            note_draft: session.note_draft.clone(),
            saving: session.writing,
            adding_note: session.adding_note,
            ai: session.ai.clone(),
            can_save_summary: session.ticket.is_some() && session.ai.can_save_summary(),
        }
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

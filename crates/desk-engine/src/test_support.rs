//! Shared test utilities for desk-engine.
//!
//! [`FakeGateway`] is an in-memory backend with the same contract as the
//! HTTP one. Tests can inject failures per operation and hold an operation
//! at a one-shot gate to force a specific interleaving on a current-thread
//! runtime.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Notify;

use desk_core::{
    entities::{AiReplyDraft, AiSummary, AiTriageSuggestion, Ticket, TicketNote},
    enums::{NoteKind, ReplyTone, TicketPriority, TicketStatus},
    fields::normalize_category,
    patch::TicketPatch,
    requests::{NewNote, NewTicket, TicketFilter},
};
use desk_gateway::{GatewayError, TicketGateway};

use crate::clipboard::{ClipboardChain, ClipboardError, CopyStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListTickets,
    GetTicket,
    CreateTicket,
    PatchTicket,
    ListNotes,
    CreateNote,
    Triage,
    Summarize,
    ReplyDraft,
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 8, 10, 0, 0).unwrap()
}

/// A plain open ticket.
pub fn ticket(id: i64) -> Ticket {
    Ticket {
        id,
        subject: format!("Ticket {id}"),
        requester_email: "a@b.com".into(),
        body: "...".into(),
        status: TicketStatus::Open,
        priority: TicketPriority::Medium,
        category: None,
        tags: Vec::new(),
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn canned_suggestion() -> AiTriageSuggestion {
    AiTriageSuggestion {
        category: Some("AUTH".into()),
        priority: Some(TicketPriority::Urgent),
        tags: vec!["login".into(), "password-reset".into()],
        rationale: "Customer is locked out after a password reset.".into(),
        ai_run_id: Some(900),
        ..Default::default()
    }
}

#[derive(Default)]
pub struct FakeGateway {
    tickets: RefCell<BTreeMap<i64, Ticket>>,
    notes: RefCell<HashMap<i64, Vec<TicketNote>>>,
    next_id: Cell<i64>,
    clock: Cell<i64>,
    suggestion: RefCell<Option<AiTriageSuggestion>>,
    failing: RefCell<HashSet<Op>>,
    gates: RefCell<HashMap<Op, Rc<Notify>>>,
    calls: RefCell<HashMap<Op, usize>>,
    patches: RefCell<Vec<(i64, TicketPatch)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        let gateway = Self::default();
        gateway.next_id.set(1);
        gateway
    }

    fn take_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn now(&self) -> DateTime<Utc> {
        let tick = self.clock.get() + 1;
        self.clock.set(tick);
        base_time() + Duration::seconds(tick)
    }

    // ── Setup ────────────────────────────────────────────────────────

    pub fn seed_ticket(&self, subject: &str) -> i64 {
        let id = self.take_id();
        let now = self.now();
        let mut t = ticket(id);
        t.subject = subject.to_string();
        t.created_at = now;
        t.updated_at = now;
        self.tickets.borrow_mut().insert(id, t);
        id
    }

    pub fn seed_note(&self, ticket_id: i64, body: &str) -> i64 {
        let note = TicketNote {
            id: self.take_id(),
            ticket_id,
            kind: NoteKind::Note,
            body: body.to_string(),
            created_at: self.now(),
        };
        let id = note.id;
        self.notes
            .borrow_mut()
            .entry(ticket_id)
            .or_default()
            .insert(0, note);
        id
    }

    pub fn edit_ticket(&self, id: i64, edit: impl FnOnce(&mut Ticket)) {
        if let Some(t) = self.tickets.borrow_mut().get_mut(&id) {
            edit(t);
        }
    }

    pub fn set_status(&self, id: i64, status: TicketStatus) {
        self.edit_ticket(id, |t| t.status = status);
    }

    pub fn set_suggestion(&self, suggestion: AiTriageSuggestion) {
        *self.suggestion.borrow_mut() = Some(suggestion);
    }

    /// The next created entity gets this id.
    pub fn set_next_id(&self, id: i64) {
        self.next_id.set(id);
    }

    pub fn fail(&self, op: Op) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    /// Hold the next call of `op` until the returned gate is notified.
    pub fn gate(&self, op: Op) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.gates.borrow_mut().insert(op, Rc::clone(&gate));
        gate
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn calls(&self, op: Op) -> usize {
        self.calls.borrow().get(&op).copied().unwrap_or(0)
    }

    pub fn patches(&self) -> Vec<TicketPatch> {
        self.patches.borrow().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn stored_ticket(&self, id: i64) -> Ticket {
        self.tickets.borrow()[&id].clone()
    }

    pub fn stored_notes(&self, ticket_id: i64) -> Vec<TicketNote> {
        self.notes
            .borrow()
            .get(&ticket_id)
            .cloned()
            .unwrap_or_default()
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    async fn enter(&self, op: Op) -> Result<(), GatewayError> {
        *self.calls.borrow_mut().entry(op).or_default() += 1;
        let gate = self.gates.borrow_mut().remove(&op);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.borrow().contains(&op) {
            return Err(GatewayError::RequestFailed {
                status: 500,
                body: format!(r#"{{"error":"INTERNAL","message":"{op:?} failed"}}"#),
            });
        }
        Ok(())
    }

    fn not_found(id: i64) -> GatewayError {
        GatewayError::RequestFailed {
            status: 404,
            body: format!(r#"{{"error":"NOT_FOUND","message":"Ticket not found: {id}"}}"#),
        }
    }

    fn require_ticket(&self, id: i64) -> Result<Ticket, GatewayError> {
        self.tickets
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn insert_note(&self, ticket_id: i64, kind: NoteKind, body: &str) -> TicketNote {
        let note = TicketNote {
            id: self.take_id(),
            ticket_id,
            kind,
            body: body.trim().to_string(),
            created_at: self.now(),
        };
        self.notes
            .borrow_mut()
            .entry(ticket_id)
            .or_default()
            .insert(0, note.clone());
        note
    }
}

impl TicketGateway for FakeGateway {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, GatewayError> {
        self.enter(Op::ListTickets).await?;
        let query = filter
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let mut tickets: Vec<Ticket> = self
            .tickets
            .borrow()
            .values()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| {
                query.as_deref().is_none_or(|q| {
                    t.subject.to_lowercase().contains(q)
                        || t.body.to_lowercase().contains(q)
                        || t.requester_email.to_lowercase().contains(q)
                })
            })
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn get_ticket(&self, id: i64) -> Result<Ticket, GatewayError> {
        self.enter(Op::GetTicket).await?;
        self.require_ticket(id)
    }

    async fn create_ticket(&self, req: &NewTicket) -> Result<Ticket, GatewayError> {
        self.enter(Op::CreateTicket).await?;
        let id = self.take_id();
        let now = self.now();
        let created = Ticket {
            id,
            subject: req.subject.clone(),
            requester_email: req.requester_email.clone(),
            body: req.body.clone(),
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            category: req.category.clone(),
            tags: req.tags.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.tickets.borrow_mut().insert(id, created.clone());
        Ok(created)
    }

    async fn patch_ticket(&self, id: i64, patch: &TicketPatch) -> Result<Ticket, GatewayError> {
        self.enter(Op::PatchTicket).await?;
        let mut current = self.require_ticket(id)?;
        if let Some(subject) = &patch.subject {
            current.subject.clone_from(subject);
        }
        if let Some(body) = &patch.body {
            current.body.clone_from(body);
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        if let Some(priority) = patch.priority {
            current.priority = priority;
        }
        if let Some(category) = &patch.category {
            current.category = category.as_deref().and_then(normalize_category);
        }
        if let Some(tags) = &patch.tags {
            current.tags.clone_from(tags);
        }
        current.updated_at = self.now();
        self.tickets.borrow_mut().insert(id, current.clone());
        self.patches.borrow_mut().push((id, patch.clone()));
        Ok(current)
    }

    async fn list_notes(&self, ticket_id: i64) -> Result<Vec<TicketNote>, GatewayError> {
        self.enter(Op::ListNotes).await?;
        self.require_ticket(ticket_id)?;
        Ok(self.stored_notes(ticket_id))
    }

    async fn create_note(
        &self,
        ticket_id: i64,
        note: &NewNote,
    ) -> Result<TicketNote, GatewayError> {
        self.enter(Op::CreateNote).await?;
        self.require_ticket(ticket_id)?;
        let kind = note.kind.clone().unwrap_or_default();
        Ok(self.insert_note(ticket_id, kind, &note.body))
    }

    async fn triage(&self, ticket_id: i64) -> Result<AiTriageSuggestion, GatewayError> {
        self.enter(Op::Triage).await?;
        self.require_ticket(ticket_id)?;
        Ok(self
            .suggestion
            .borrow()
            .clone()
            .unwrap_or_else(canned_suggestion))
    }

    async fn summarize(
        &self,
        ticket_id: i64,
        save_as_note: bool,
    ) -> Result<AiSummary, GatewayError> {
        self.enter(Op::Summarize).await?;
        let t = self.require_ticket(ticket_id)?;
        let mut summary = AiSummary {
            ticket_id: Some(ticket_id),
            summary: format!("Summary of '{}'.", t.subject),
            key_points: vec!["Reset link expired".into(), "Tried twice".into()],
            saved_note_id: None,
        };
        if save_as_note {
            let note = self.insert_note(ticket_id, NoteKind::AiSummary, &summary.summary);
            summary.saved_note_id = Some(note.id);
        }
        Ok(summary)
    }

    async fn reply_draft(
        &self,
        ticket_id: i64,
        tone: ReplyTone,
    ) -> Result<AiReplyDraft, GatewayError> {
        self.enter(Op::ReplyDraft).await?;
        self.require_ticket(ticket_id)?;
        Ok(AiReplyDraft {
            ticket_id: Some(ticket_id),
            tone,
            draft: format!("Hello,\n\n[{tone}] Thanks for reaching out.\n"),
            ai_run_id: Some(self.take_id()),
        })
    }
}

// ── Clipboard ────────────────────────────────────────────────────────

/// Clipboard strategy that records copies, or always fails.
pub struct RecordingClipboard {
    fail: bool,
    copies: Rc<RefCell<Vec<String>>>,
}

impl CopyStrategy for RecordingClipboard {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Strategy {
                strategy: "recording",
                reason: "blocked".into(),
            });
        }
        self.copies.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// A one-strategy chain and the log of what it copied.
pub fn recording_clipboard(fail: bool) -> (ClipboardChain, Rc<RefCell<Vec<String>>>) {
    let copies = Rc::new(RefCell::new(Vec::new()));
    let chain = ClipboardChain::new(vec![Box::new(RecordingClipboard {
        fail,
        copies: Rc::clone(&copies),
    })]);
    (chain, copies)
}

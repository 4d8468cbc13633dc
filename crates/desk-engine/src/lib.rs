//! # desk-engine
//!
//! Ticket workspace synchronization engine.
//!
//! Keeps a locally edited ticket, its notes timeline and three AI workflow
//! results consistent with the backend while several requests are in
//! flight:
//! - [`workspace::Workspace`]: per-ticket session controller and the only
//!   entry point a front end calls
//! - [`edit_buffer::EditBuffer`]: editable triage fields, committed as one patch
//! - [`timeline::NotesTimeline`]: newest-first notes with optimistic prepend
//! - [`ai::AiCoordinator`]: triage, summary and reply-draft slots
//! - [`clipboard::ClipboardChain`]: ranked copy strategies for reply drafts
//! - [`inbox::Inbox`]: ticket list and create form

pub mod ai;
pub mod clipboard;
pub mod edit_buffer;
pub mod inbox;
pub mod timeline;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use clipboard::{ClipboardChain, ClipboardError, CopyStrategy};
pub use inbox::{Inbox, TicketDraft};
pub use workspace::{Outcome, Phase, Rejection, Workspace, WorkspaceView};

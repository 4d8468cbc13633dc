//! # desk-core
//!
//! Core types and error types for Triage Desk.
//!
//! This crate provides the foundational types shared across all desk crates:
//! - Entity structs mirroring the backend wire format (tickets, notes, AI results)
//! - Status, priority, tone and note-kind enums
//! - Typed partial updates (`TicketPatch`, `TriagePatch`) and their builders
//! - Request bodies and list filters sent to the backend
//! - Form-field normalization rules (tags, category)
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod patch;
pub mod requests;

mod de;

//! # bidgate-core
//!
//! Core types and domain rules for bidgate.
//!
//! This crate provides the foundational types shared across all bidgate crates:
//! - Entity structs in their stable external shape (clients, tenders, evidence, projects)
//! - Enums for evidence categories, invite state, subscription status, and document kinds
//! - Invite-token derivation and the invite acceptance state machine
//! - The evidence category tally
//! - Response envelopes returned by the HTTP API
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod evidence;
pub mod invite;
pub mod responses;

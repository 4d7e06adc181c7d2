//! # Querydeck Architecture
//!
//! Querydeck is a **UI-agnostic query editor core**. It tracks a deck of named
//! text snippets ("queries") while they are edited, tells which of them
//! differ from what the remote store last saw, and pushes the difference.
//! The terminal client in this crate is one UI; a browser page could drive
//! the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Interactive shell, prompts for popups, colored output    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - QueryManager: state getters + actions                    │
//! │  - Routes switch/create/push through the confirmation gate  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! │  - Composes state transitions with remote + navigator       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (state, store, session, reconcile, gate)              │
//! │  - Pure in-memory transitions and derivations               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle of an edit
//!
//! 1. `load` fetches the instance's queries; they become both the live store
//!    and the **baseline**.
//! 2. `select` opens a query; typing changes the **edit buffer** only
//!    (status: unsaved).
//! 3. `save` commits the buffer into the store (status: unpushed).
//! 4. `push` upserts new/modified queries, deletes marked ones, and moves the
//!    baseline forward (status: synced).
//!
//! Switching queries, creating one, or pushing while the buffer is dirty
//! raises a save-before-proceed popup instead of losing the edit.
//!
//! ## Collaborators
//!
//! The core does not reach for globals. The remote store ([`remote`]), the
//! signed-in user ([`identity`]) and the URL ([`routing`]) are injected.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`state`]: Editor state and its primitive transitions
//! - [`store`]: Live query collection and baseline snapshot
//! - [`session`]: The open query and its buffer
//! - [`reconcile`]: Status classification and push planning
//! - [`gate`]: Confirmation popups
//! - [`remote`]: Remote store trait and implementations
//! - [`identity`], [`routing`]: Injected collaborators
//! - [`config`], [`logging`], [`editor`], [`error`], [`model`]

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod gate;
pub mod identity;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod remote;
pub mod routing;
pub mod session;
pub mod state;
pub mod store;

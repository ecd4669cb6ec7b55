//! # Jobtrack Architecture
//!
//! Jobtrack is a **UI-agnostic job application tracker**. The terminal session that ships
//! with it is one client; the library underneath knows nothing about terminals.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads session lines, parses them, prints results         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store, the edit session and the list state      │
//! │  - Resolves row selectors to application ids                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business operations returning `CmdResult`                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - store: canonical, insertion-ordered records              │
//! │  - view: search → filter → sort → paginate                  │
//! │  - session: the single in-flight inline edit                │
//! │  - validation: required-field checks for add and edit       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Explicit Ownership
//!
//! There is no ambient global store. An [`store::ApplicationStore`] is built once and
//! passed by reference to whatever needs it; [`api::TrackerApi`] is simply the usual owner.
//! Reads go through [`store::ApplicationStore::list`], which hands out a defensive copy.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: The in-memory application store
//! - [`view`]: The derived-view pipeline
//! - [`list_state`]: Search/filter/sort/page state kept by list clients
//! - [`session`]: Inline edit state machine
//! - [`validation`]: Form validation shared by add and edit
//! - [`model`]: Core data types (`Application`, `ApplicationFields`, `ApplicationForm`)
//! - [`index`]: Numbered display rows and row selectors
//! - [`config`]: Configuration management
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod list_state;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod validation;
pub mod view;

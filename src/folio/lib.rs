//! # Folio Architecture
//!
//! Folio is the feedback engine behind a portfolio site's contact form: it
//! accepts visitor submissions, stores them durably, lists and filters them
//! for the site owner and exports them as CSV.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: HTTP server (server.rs), CLI (main.rs, cli/)      │
//! │  - Parse requests/arguments, format responses/output        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, supplies the clock            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - submit, list, delete, export                             │
//! │  - Built on validate.rs, query.rs, export.rs                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - FeedbackStore trait                                      │
//! │  - DocumentStore (JSON file), TableStore (SQLite),          │
//! │    InMemoryStore (testing)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submission flow
//!
//! submission → [`validate::validate`] → [`store::FeedbackStore::create`].
//! Validation failures never reach the store. The document store assigns a
//! clock-derived id ([`identity`]); the table store lets SQLite assign one.
//!
//! ## Read flow
//!
//! [`store::FeedbackStore::snapshot`] → [`query::filter_entries`] →
//! [`query::sort_newest_first`] → JSON, admin page data, or
//! [`export::to_csv`].
//!
//! ## Module Overview
//!
//! - [`api`]: the facade every client goes through
//! - [`commands`]: business logic for each operation
//! - [`store`]: storage trait and backends
//! - [`model`]: `FeedbackEntry`, `Submission`, `EntryId`, `Phone`
//! - [`validate`]: submission rules
//! - [`identity`]: clock-derived ids for the document backend
//! - [`query`]: search, contact-type and date-range filters
//! - [`export`]: CSV report
//! - [`server`]: axum router
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod model;
pub mod query;
pub mod server;
pub mod store;
pub mod validate;

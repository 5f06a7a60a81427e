//! # Council Architecture
//!
//! Council is the **content-management core of a municipal council website**:
//! the admin panel that edits news, gallery photos, tenders, downloadable
//! forms, static pages, users and website components. It is a library that
//! happens to ship a CLI client, not a CLI with some library code attached.
//!
//! ## One Editor, Many Collections
//!
//! Every admin screen that manages a list of records behaves the same way:
//! add, edit, toggle status, delete, filter. Instead of one hand-written
//! screen per collection there is one generic [`editor::CollectionEditor`],
//! configured by a record-shape descriptor ([`schema::CollectionSchema`]).
//! The concrete descriptors live in [`catalog`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One admin session: operator, config, activity, settings  │
//! │  - Normalizes inputs (collection names, raw ids, fields)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editor Layer (editor/)                                     │
//! │  - Filter view, form controller, action dispatcher          │
//! │  - Protection and confirmation rules                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: ids, timestamps, derived fields, protection │
//! │  - StorageBackend trait, MemBackend (session memory)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values.
//! It never writes to stdout/stderr, never exits the process and never reads
//! a terminal. Confirmation prompts cross the boundary through the
//! [`editor::dispatch::Prompter`] trait.
//!
//! ## Sessions
//!
//! Nothing is persisted. An admin session starts from the seed records in
//! [`fixtures`] and its changes live as long as the [`api::AdminApi`] value.
//! For the CLI that is one process (or one `council shell`).
//!
//! ## Testing Strategy
//!
//! 1. **Store and editor** (`store/`, `editor/`): the bulk of the tests, run
//!    against `MemBackend` and the `StoreFixture` helpers.
//! 2. **API** (`api.rs`): dispatch, authentication and input normalization.
//! 3. **CLI** (`tests/`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for every operation
//! - [`editor`]: Collection editor (filter, form, dispatch)
//! - [`store`]: Record store and storage backends
//! - [`schema`]: Record-shape descriptors
//! - [`catalog`]: The seven collections of the admin panel
//! - [`fixtures`]: Seed records
//! - [`model`]: `Record`, `RecordId`, `FieldValue`
//! - [`settings`]: Site settings editor
//! - [`dashboard`]: Totals and the activity feed
//! - [`auth`]: Placeholder login context
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, prompts and rendering for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod schema;
pub mod settings;
pub mod store;

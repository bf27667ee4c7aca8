//! # Diary Architecture
//!
//! A book-shaped personal diary: two facing pages at a time, flipped forward and
//! backward, with sticky notes dropped anywhere on the book and dragged around.
//! Everything is kept in a small key-value store.
//!
//! Like any UI-agnostic core, the library never touches the terminal. The
//! `diary` binary is one client; anything able to draw a [`api::BookView`] and
//! forward clicks, keystrokes and animation ends could be another.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Session loop, argument parsing, templated rendering      │
//! │  - Runs the flip timer and reports completion               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Composition root: owns every piece of state              │
//! │  - Routes events, builds the BookView snapshot              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Components                                                 │
//! │  entries · notes · navigator · placement · animation        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Philosophy
//!
//! Invalid requests (a flip at the last spread, a second flip mid-turn, an
//! unknown note id) are ignored. Unreadable stored data is not: it fails the
//! load and surfaces as an error to the client.
//!
//! ## Module Overview
//!
//! - [`api`]: the composition root
//! - [`entries`]: page entries repository
//! - [`notes`]: sticky note repository
//! - [`navigator`]: spread tracking and the flip state machine
//! - [`placement`]: sticky placement mode
//! - [`animation`]: sheet transform and flip timing
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: core data types
//! - [`config`]: configuration management
//! - [`logging`]: file logging bootstrap
//! - [`error`]: error types

pub mod animation;
pub mod api;
pub mod config;
pub mod entries;
pub mod error;
pub mod logging;
pub mod model;
pub mod navigator;
pub mod notes;
pub mod placement;
pub mod store;

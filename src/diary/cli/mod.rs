//! # CLI Behavior
//!
//! One client for the diary. This is the only place that knows about the
//! terminal, exit codes and how output looks.
//!
//! ### Naked Execution (`diary`)
//!
//! Running `diary` with no arguments opens the interactive session: the book
//! is drawn at its first spread and commands are read one per line until
//! `quit` or end of input. Flips are animated in place, then the book is
//! redrawn at the new spread.
//!
//! ### One-Shot Commands
//!
//! `show`, `write`, `sticky …`, `config` and `link` open the diary, do one
//! thing and exit. They go through the same API calls as the session.
//!
//! ### Coordinates
//!
//! Click and drag points are in pixels of the book container, which is
//! `book-width` × `book-height` from the config with its origin at the top
//! left. Notes are 160px squares.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `session`: the interactive loop and flip animation timer
//! - `render`: layout and template rendering
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles
//! - `templates`: output templates

mod commands;
mod render;
mod session;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;

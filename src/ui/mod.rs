//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, tree cursor
//! - **[`outline`]**: flattens a syntax tree into indented rows
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   syntax tree, tokens, diagnostics, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source text
//! and an [`ErrorPolicy`], then call [`App::run`] to start the event loop.
//!
//! [`ErrorPolicy`]: crate::parser::ErrorPolicy
//! [`App::run`]: app::App::run

pub mod app;
pub mod outline;
pub mod panes;
pub mod theme;

pub use app::App;

//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display highlighted from the token stream, with
//!   diagnostic lines marked and the selected node's line highlighted
//! - [`tree`]: Indented syntax tree outline with a cursor
//! - [`tokens`]: Token listing with positions and categories
//! - [`diagnostics`]: Lexical and syntax errors
//! - [`status`]: Status bar with keybindings and parse result
//! - `utils`: Shared block, scrolling and selection helpers
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*_pane()` function. Render
//! functions are stateless apart from the scroll offsets they are handed.

mod utils;

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;

//! Page-builder engine.
//!
//! This crate models a web page as an ordered list of typed blocks and
//! provides the editing core around it: snapshot undo/redo, direct
//! manipulation of layout values, canvas drag-and-drop, per-block code mode
//! and deterministic markup generation.
//!
//! The binary `pagecraft` renders, resolves and checks page documents from
//! the command line.

pub mod code_mode;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod generator;
pub mod model;
pub mod store;
pub mod style;

pub use error::ModelError;

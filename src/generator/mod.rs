//! Page markup generator.
//!
//! - [`markup`] – Generate HTML from resolved block content and whole pages.

pub mod markup;

pub use markup::{PAGE_STYLESHEET, block_markup, generate_block_markup, generate_page_markup};

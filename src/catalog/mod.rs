//! Catalog module holding the extracted archive metadata
//!
//! # Components
//!
//! - `Article`: One catalog entry at one version grouping, owning its files
//! - `File`: One downloadable artifact with its storage and mirror links

mod article;
mod file;

// Re-export main types
pub use article::Article;
pub use file::{File, FIXED_COLUMNS};

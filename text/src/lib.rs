//! Text storage and edit planning for Wren
//!
//! This crate owns the canonical text of a document and decides what an edit
//! request actually does before anything is mutated. It knows nothing about
//! highlighting or rendering; the `wren` crate drives it.
//!
//! The key components are:
//! - [`buffer::Buffer`] - Character-addressed text with a caret
//! - [`pairs::DelimiterPairs`] - The process-wide opening/closing delimiter table
//! - [`pairs::PairPolicy`] - Turns insert/remove requests into concrete edits
//! - [`offset`] - Conversions between character and byte offsets

pub mod buffer;
pub mod offset;
pub mod pairs;

pub use buffer::Buffer;
pub use pairs::{DelimiterPairs, InsertPlan, PairPolicy, RemovePlan, DELIMITER_PAIRS};

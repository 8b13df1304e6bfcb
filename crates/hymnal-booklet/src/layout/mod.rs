//! Layout calculation for the booklet
//!
//! This module turns songs into logical pages before anything is drawn:
//! - Section composition (full sections and repeat markers)
//! - Height estimation used to decide page breaks
//! - Greedy pagination into fixed-height columns
//! - Word wrapping against a measured width

mod content;
mod paginate;
mod wrap;

pub use content::*;
pub use paginate::*;
pub use wrap::*;

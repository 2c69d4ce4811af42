//! Report rendering for search outcomes.

mod markdown;

pub use markdown::{format_error, format_outcome, format_paper, format_papers, group_thousands};

//! Data models shared across the pipeline.
//!
//! Input models use camelCase field names on the wire, matching the MCP
//! tool schemas; internal records are plain Rust shapes.

mod outcome;
mod paper;
mod request;

pub use outcome::SearchOutcome;
pub use paper::{OpenAccessStatus, PaperRecord};
pub use request::{SearchFilters, SearchPapersInput, SearchRequest, SortOrder, YearFilter};

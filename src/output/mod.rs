//! Output module: record construction, path reconstruction, and submission
//!
//! Everything here runs after the crawl is quiescent; nothing in this module
//! performs listing traffic.

mod path;
mod records;
mod submit;

pub use path::{resolve_path, resolve_paths};
pub use records::{build_records, FolderRecord};
pub use submit::submit_records;

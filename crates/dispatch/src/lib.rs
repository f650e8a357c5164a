//! Keyword operation dispatcher.
//!
//! Given a keyword, an operation, and a dry-run flag: fetch the hosts whose
//! name matches the keyword (and, for trigger operations, their triggers
//! filtered by current severity), then either report the matches or mutate
//! each one. Each invocation is a single linear fetch → filter →
//! (report | mutate-each) pipeline with no retained state.

mod error;
mod operation;

pub use error::{Error, Result};
pub use operation::{run, Failure, MatchedTrigger, Operation, Outcome};

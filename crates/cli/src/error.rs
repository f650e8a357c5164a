//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Some mutations in the batch failed. The remaining entities were
    /// still attempted; the per-entity failures were already logged.
    #[error("{failed} of {total} updates failed")]
    PartialFailure { failed: usize, total: usize },

    /// An error occurred talking to the Zabbix API.
    #[error(transparent)]
    Api(#[from] api::Error),

    /// An error occurred in the dispatch layer.
    #[error(transparent)]
    Dispatch(#[from] dispatch::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

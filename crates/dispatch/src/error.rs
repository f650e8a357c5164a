use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The fetch failed, so the operation had nothing to iterate.
    /// Per-entity mutation failures are not errors; they are collected in
    /// the [`Outcome`](crate::Outcome) instead.
    #[error(transparent)]
    Api(#[from] api::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Enum of the possible error variants that may be encountered
#[derive(Error, Debug)]
pub enum IgrfError {
    /// The coefficient source is incomplete, non-numeric, or violates the
    /// triangular degree/order constraint. No model is produced.
    #[error("{0}")]
    MalformedInput(String),

    /// The query epoch precedes the first tabulated epoch, or a degree/order
    /// index falls outside the loaded table. The table itself stays valid.
    #[error("{0}")]
    OutOfRange(String),
}

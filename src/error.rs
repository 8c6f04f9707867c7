use thiserror::Error;

/// Errors raised by the profiling engine. I/O and decode failures are
/// reported by the command layer with `anyhow` context instead.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The distinct-value cap must be at least 1.
    #[error("unique value limit must be at least 1")]
    InvalidArgument,
    /// A row contained a value kind outside the scalar data model.
    /// The caller decides whether to abort the run or skip the row.
    #[error("cannot profile {kind} value in column {column}")]
    UnsupportedValueKind { column: usize, kind: &'static str },
}

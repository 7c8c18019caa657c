/// Errors reported by the positional operations of the collections.
///
/// Operations that answer with a `bool` (`add`, `contains`, `remove`) never
/// fail; absent values are simply reported as not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An index outside `0..len` was used.
    #[error("index {index} is out of range for a collection of length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The number of elements at the time of the call.
        len: usize,
    },
    /// A value the equality strategy reports as absent was passed where a
    /// stored value is required.
    #[error("absent values cannot be stored")]
    NullArgument,
    /// Replacing the value at `index` would duplicate another element.
    #[error("cannot set index {index} as this would result in a duplicate value")]
    DuplicateViolation {
        /// The position the caller tried to overwrite.
        index: usize,
    },
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

use core::fmt;

/// Failure conditions reported by tree operations.
///
/// All of these are synchronous and local: a failed call performs no
/// mutation, so the tree is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An absent key or node handle was passed to an operation that
    /// requires a present one.
    NullInput,
    /// The two nodes passed to a rotation are not in a direct
    /// parent-child relationship.
    InvalidRelation,
    /// The iterator was advanced past its last value.
    Exhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullInput => write!(f, "absent key or node handle"),
            Self::InvalidRelation => {
                write!(f, "nodes are not in a parent-child relationship")
            }
            Self::Exhausted => write!(f, "iterator has no more values"),
        }
    }
}

impl std::error::Error for Error {}

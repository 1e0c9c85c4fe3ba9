use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A resource or view the operation reads from was not supplied.
    #[error("required {0} is missing")]
    NullReference(&'static str),

    /// A fixed-size array argument had the wrong length.
    #[error("{what} must have exactly {expected} elements, got {actual}")]
    InvalidSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A dimension tag with no matching branch, a raw enum value with no
    /// variant, or a start index past the end of the resource.
    #[error("{what} {value} is out of range")]
    OutOfRange { what: &'static str, value: u32 },

    #[error("unknown {what} name {name:?}")]
    UnknownName { what: &'static str, name: String },
}

impl Error {
    pub(crate) fn invalid_size(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidSize {
            what,
            expected,
            actual,
        }
    }
}

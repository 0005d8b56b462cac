use std::error;
use std::fmt;
use std::result;

/// Failures reported by the map operations that do not have an `Option` form.
///
/// Every failure is local to the call that produced it and leaves the map structurally valid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `add` was called with a key that is already present.
    DuplicateKey,
    /// `get` was called with a key that is not present.
    KeyNotFound,
    /// An argument was out of range, such as a destination slice that is too small for `copy_to`.
    InvalidArgument(&'static str),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "an element with the same key already exists"),
            Error::KeyNotFound => write!(f, "the given key was not present"),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::DuplicateKey.to_string(),
            "an element with the same key already exists",
        );
        assert_eq!(Error::KeyNotFound.to_string(), "the given key was not present");
        assert_eq!(
            Error::InvalidArgument("offset out of range").to_string(),
            "invalid argument: offset out of range",
        );
    }

    #[test]
    fn test_boxed_error() {
        let err: Box<dyn error::Error> = Box::new(Error::KeyNotFound);
        assert_eq!(err.to_string(), "the given key was not present");
        assert!(err.source().is_none());
    }
}

use thiserror::Error;

/// The error type a factory may return, boxed so pools of any item type share one error type.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when operating on a [`PoolList`][crate::PoolList].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An item was accessed by position but the position did not refer to an active item.
    #[error("index {index} is out of range for a pool list with {len} active items")]
    OutOfRange {
        /// The index that was requested.
        index: usize,

        /// The number of active items at the time of the request.
        len: usize,
    },

    /// The pool list was asked to scope itself to a negative number of active items, or to a
    /// number that cannot be represented as `usize`.
    #[error("target count must be a non-negative value that fits in usize")]
    InvalidTargetCount,

    /// The factory failed to create a new item.
    ///
    /// The factory's own error is carried as-is: both the message and the source chain are
    /// those of the original error.
    #[error(transparent)]
    Factory(FactoryError),
}

impl Error {
    /// Returns the original factory error if this is [`Error::Factory`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::io;
    ///
    /// use pool_list::PoolList;
    ///
    /// let mut list = PoolList::<u32>::with_fallible_factory(|| {
    ///     Err(io::Error::other("out of handles"))
    /// });
    ///
    /// let error = list.acquire().unwrap_err();
    /// let original = error.into_factory_error().unwrap();
    ///
    /// assert_eq!(original.to_string(), "out of handles");
    /// assert!(original.downcast_ref::<io::Error>().is_some());
    /// ```
    #[must_use]
    pub fn into_factory_error(self) -> Option<FactoryError> {
        match self {
            Self::Factory(inner) => Some(inner),
            _ => None,
        }
    }
}

/// A specialized `Result` type for pool list operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

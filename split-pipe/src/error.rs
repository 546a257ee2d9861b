//! Error types shared by the composite streams.
//!
//! Failures from underlying streams are never rewritten: read errors pass
//! through verbatim, write errors are carried in [`SplitError::Sink`], and
//! operations that touch several streams at once (closing) bundle every
//! failure into a [`MultiError`].

use alloc::vec::Vec;
use core::fmt;
use embedded_io::ErrorKind;

/// An ordered collection of failures from independent operations.
///
/// Produced by the `close` operations, which attempt to release every stream
/// even when some of them fail. Failures keep the order in which they were
/// encountered and are never deduplicated.
///
/// The message is every failure's message joined by a single `\n`.
///
/// # Examples
///
/// ```
/// use split_pipe::MultiError;
/// use embedded_io::ErrorKind;
///
/// let err = MultiError::from(vec![ErrorKind::BrokenPipe, ErrorKind::TimedOut]);
/// assert_eq!(err.len(), 2);
/// assert_eq!(err.errors(), &[ErrorKind::BrokenPipe, ErrorKind::TimedOut]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiError<E> {
    errors: Vec<E>,
}

impl<E> MultiError<E> {
    /// Combine the given failures into one, preserving their order.
    pub fn new(errors: Vec<E>) -> Self {
        Self { errors }
    }

    /// The original failures, in the order they occurred.
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Consume the aggregate and return the original failures.
    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }

    /// Number of failures held.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the aggregate holds no failures.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the failures in order.
    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, the aggregate otherwise.
    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<E> From<Vec<E>> for MultiError<E> {
    fn from(errors: Vec<E>) -> Self {
        Self::new(errors)
    }
}

impl<E> IntoIterator for MultiError<E> {
    type Item = E;
    type IntoIter = alloc::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a MultiError<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl<E: fmt::Display> fmt::Display for MultiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for MultiError<E> {}

impl<E: fmt::Debug + fmt::Display> embedded_io::Error for MultiError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Failure of a fan-out write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError<E> {
    /// A sink failed; the error is the sink's own, unmodified.
    Sink(E),
    /// A sink accepted fewer bytes than it was given without failing.
    ShortWrite {
        /// Bytes the sink reported as written.
        written: usize,
        /// Bytes the sink was asked to write.
        requested: usize,
    },
}

impl<E> SplitError<E> {
    /// Whether this is the short-write condition rather than a sink failure.
    pub fn is_short_write(&self) -> bool {
        matches!(self, Self::ShortWrite { .. })
    }

    /// The sink failure, if this is one.
    pub fn into_sink(self) -> Option<E> {
        match self {
            Self::Sink(e) => Some(e),
            Self::ShortWrite { .. } => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for SplitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink(e) => write!(f, "{}", e),
            Self::ShortWrite { .. } => f.write_str("short write"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for SplitError<E> {}

impl<E: embedded_io::Error> embedded_io::Error for SplitError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Sink(e) => e.kind(),
            Self::ShortWrite { .. } => ErrorKind::WriteZero,
        }
    }
}

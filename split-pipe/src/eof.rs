//! A stream that is already at its end.

use core::fmt;
use core::marker::PhantomData;

use embedded_io::{ErrorKind, ErrorType, Read};

use crate::close::Close;

/// A stream that reports end-of-stream on its first read and whose release
/// never fails.
///
/// Useful as a neutral placeholder in a source list. The error type is only
/// nominal and can be picked to match the other sources.
///
/// # Examples
///
/// ```
/// use split_pipe::Eof;
/// use embedded_io::Read;
///
/// let mut eof = Eof::<core::convert::Infallible>::new();
/// assert_eq!(eof.read(&mut [0u8; 16]).unwrap(), 0);
/// ```
pub struct Eof<E = ErrorKind> {
    _error: PhantomData<fn() -> E>,
}

impl<E> Eof<E> {
    /// Create the placeholder.
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for Eof<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Eof<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Copy for Eof<E> {}

impl<E> fmt::Debug for Eof<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Eof")
    }
}

impl<E: embedded_io::Error> ErrorType for Eof<E> {
    type Error = E;
}

impl<E: embedded_io::Error> Read for Eof<E> {
    #[inline]
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, E> {
        Ok(0)
    }
}

impl<E: embedded_io::Error> Close for Eof<E> {
    #[inline]
    fn close(&mut self) -> Result<(), E> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_reads_nothing_forever() {
        let mut eof: Eof = Eof::new();
        let mut buf = [7u8; 4];

        assert_eq!(eof.read(&mut buf), Ok(0));
        assert_eq!(eof.read(&mut buf), Ok(0));
        assert_eq!(buf, [7u8; 4]);
    }

    #[test]
    fn test_eof_close_is_noop() {
        let mut eof: Eof = Eof::default();

        assert_eq!(eof.close(), Ok(()));
        assert_eq!(eof.close(), Ok(()));
    }
}

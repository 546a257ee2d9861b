//! Close port - release of an underlying stream.
//!
//! `embedded_io` has no notion of releasing a stream other than dropping it,
//! which cannot report failure. Streams that need an explicit, fallible
//! release implement [`Close`]; the closable composites drive it.

use alloc::boxed::Box;
use embedded_io::{ErrorType, Read, Write};

/// Port for releasing a stream.
///
/// The release failure shares the stream's [`ErrorType`], so a source's read
/// failures and release failures can be reported through the same channel.
///
/// Calling `close` more than once, or using the stream after a successful
/// `close`, is implementation defined; the composites in this crate never do
/// either.
pub trait Close: ErrorType {
    /// Release the stream and any resources it holds.
    ///
    /// # Errors
    ///
    /// Returns the stream's error if the release failed.
    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<T: ?Sized + Close> Close for &mut T {
    #[inline]
    fn close(&mut self) -> Result<(), Self::Error> {
        T::close(self)
    }
}

impl<T: ?Sized + Close> Close for Box<T> {
    #[inline]
    fn close(&mut self) -> Result<(), Self::Error> {
        T::close(self)
    }
}

/// A readable stream that can also be released.
///
/// Blanket-implemented; exists so heterogeneous sources can be boxed as
/// `Box<dyn ReadClose<Error = E>>`.
pub trait ReadClose: Read + Close {}

impl<T: ?Sized + Read + Close> ReadClose for T {}

/// A writable stream that can also be released.
///
/// Blanket-implemented; exists so heterogeneous sinks can be boxed as
/// `Box<dyn WriteClose<Error = E>>`.
pub trait WriteClose: Write + Close {}

impl<T: ?Sized + Write + Close> WriteClose for T {}

/// Attaches a release action to a stream that has none of its own.
///
/// Reads and writes go straight to the wrapped stream; `close` runs the
/// closure.
///
/// # Examples
///
/// ```
/// use split_pipe::{Close, WithClose};
/// use embedded_io::Read;
///
/// let mut released = false;
/// let mut stream = WithClose::new(&b"abc"[..], || {
///     released = true;
///     Ok(())
/// });
///
/// let mut buf = [0u8; 3];
/// assert_eq!(stream.read(&mut buf).unwrap(), 3);
/// stream.close().unwrap();
/// drop(stream);
/// assert!(released);
/// ```
pub struct WithClose<S, F> {
    inner: S,
    on_close: F,
}

impl<S, F> WithClose<S, F>
where
    S: ErrorType,
    F: FnMut() -> Result<(), S::Error>,
{
    /// Wrap `inner`, running `on_close` whenever the wrapper is closed.
    pub fn new(inner: S, on_close: F) -> Self {
        Self { inner, on_close }
    }
}

impl<S, F> WithClose<S, F> {
    /// Borrow the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutably borrow the wrapped stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Discard the release action and return the wrapped stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ErrorType, F> ErrorType for WithClose<S, F> {
    type Error = S::Error;
}

impl<S: Read, F> Read for WithClose<S, F> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf)
    }
}

impl<S: Write, F> Write for WithClose<S, F> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.inner.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<S, F> Close for WithClose<S, F>
where
    S: ErrorType,
    F: FnMut() -> Result<(), S::Error>,
{
    fn close(&mut self) -> Result<(), Self::Error> {
        (self.on_close)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use embedded_io::ErrorKind;

    #[test]
    fn test_with_close_forwards_reads() {
        let mut stream = WithClose::new(&b"hello"[..], || Ok(()));
        let mut buf = [0u8; 8];

        assert_eq!(stream.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"hello");
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_with_close_forwards_writes() {
        let mut stream = WithClose::new(Vec::<u8>::new(), || Ok(()));

        assert_eq!(stream.write(b"abc").unwrap(), 3);
        stream.flush().unwrap();
        assert_eq!(stream.into_inner(), b"abc");
    }

    #[test]
    fn test_with_close_runs_release_action() {
        let calls = Cell::new(0);
        let mut stream = WithClose::new(TestSink, || {
            calls.set(calls.get() + 1);
            Err(ErrorKind::BrokenPipe)
        });

        assert_eq!(stream.close(), Err(ErrorKind::BrokenPipe));
        assert_eq!(stream.close(), Err(ErrorKind::BrokenPipe));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_close_through_box_and_reference() {
        let calls = Cell::new(0);
        let mut boxed: Box<dyn ReadClose<Error = ErrorKind> + '_> =
            Box::new(WithClose::new(TestSink, || {
                calls.set(calls.get() + 1);
                Ok(())
            }));

        boxed.close().unwrap();
        (&mut boxed).close().unwrap();
        assert_eq!(calls.get(), 2);
    }

    struct TestSink;

    impl ErrorType for TestSink {
        type Error = ErrorKind;
    }

    impl Read for TestSink {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Ok(0)
        }
    }
}

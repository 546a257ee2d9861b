//! Reading several sources as one stream.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use embedded_io::{ErrorType, Read};

use crate::engine::{self, SourceQueue, Transfer};

/// Reads from an ordered list of sources as if they were one long stream.
///
/// Sources are read to completion in the order given. Unlike a plain chain,
/// one `read` call keeps going into the next source when the current one
/// runs dry, so it only returns fewer bytes than requested once every source
/// is exhausted.
///
/// Exhausted sources are dropped from the list but never released; the
/// caller stays responsible for releasing them. Use
/// [`MultiReadCloser`](crate::MultiReadCloser) to hand release over.
///
/// # Examples
///
/// ```
/// use split_pipe::MultiReader;
/// use embedded_io::Read;
///
/// let mut reader = MultiReader::new([&b"abc"[..], &b"def"[..], &b"ghi"[..]]);
/// let mut buf = [0u8; 4];
///
/// assert_eq!(reader.read(&mut buf).unwrap(), 4);
/// assert_eq!(&buf, b"abcd");
/// assert_eq!(reader.read(&mut buf).unwrap(), 4);
/// assert_eq!(&buf, b"efgh");
/// assert_eq!(reader.read(&mut buf).unwrap(), 1);
/// assert_eq!(reader.read(&mut buf).unwrap(), 0);
/// ```
pub struct MultiReader<R: ErrorType> {
    sources: VecDeque<R>,
    pending: Option<R::Error>,
}

impl<R: Read> MultiReader<R> {
    /// Create a reader over `sources`, consumed in iteration order.
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self {
            sources: sources.into_iter().collect(),
            pending: None,
        }
    }

    /// Fill `buf` as far as the remaining sources allow.
    ///
    /// Reports the exact outcome: the bytes gathered and, if a source failed,
    /// that source's error alongside them. End-of-stream is only reported
    /// with zero bytes, once no sources remain.
    ///
    /// A failure parked by an earlier [`read`](Read::read) call is reported
    /// first, with zero bytes.
    pub fn fill(&mut self, buf: &mut [u8]) -> Transfer<R::Error> {
        if let Some(e) = self.pending.take() {
            return Transfer::failed(0, e);
        }
        engine::fill(&mut Sources(&mut self.sources), buf)
    }

    /// Number of sources not yet exhausted.
    pub fn remaining(&self) -> usize {
        self.sources.len()
    }

    /// Whether every source has been exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.sources.is_empty() && self.pending.is_none()
    }

    /// Recover the sources that were not exhausted yet, in order.
    pub fn into_sources(self) -> Vec<R> {
        self.sources.into()
    }
}

impl<R: Read> ErrorType for MultiReader<R> {
    type Error = R::Error;
}

impl<R: Read> Read for MultiReader<R> {
    /// Read from the sources into `buf`.
    ///
    /// Returns `Ok(0)` only when `buf` is empty or every source is exhausted.
    /// A source failure that happens after some bytes were gathered is
    /// returned by the following call, so no bytes are lost.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let transfer = self.fill(buf);
        engine::settle(&mut self.pending, transfer)
    }
}

/// Queue that drops exhausted sources without releasing them.
struct Sources<'a, R>(&'a mut VecDeque<R>);

impl<R: Read> SourceQueue for Sources<'_, R> {
    type Source = R;

    fn head(&mut self) -> Option<&mut R> {
        self.0.front_mut()
    }

    fn evict(&mut self) -> Result<(), R::Error> {
        self.0.pop_front();
        trace!("source exhausted, {} remaining", self.0.len());
        Ok(())
    }
}

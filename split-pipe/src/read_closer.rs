//! Reading several closable sources as one stream, with release handling.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use embedded_io::{ErrorType, Read};

use crate::close::Close;
use crate::engine::{self, SourceQueue, Transfer};
use crate::error::MultiError;

/// When the sources of a [`MultiReadCloser`] are released.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Sources are only released by [`MultiReadCloser::close`].
    #[default]
    OnClose,
    /// Each source is released as soon as it is exhausted during a read.
    /// `close` releases whatever was not exhausted yet.
    OnExhaustion,
}

/// A [`MultiReader`](crate::MultiReader) that owns the release of its
/// sources.
///
/// [`close`](Self::close) releases every source still held, in order, and
/// keeps going past individual failures. With
/// [`ReleasePolicy::OnExhaustion`], sources are released the moment a read
/// exhausts them instead; a failure to release is then reported by that read
/// and no further source is consulted.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use core::convert::Infallible;
/// use split_pipe::{MultiReadCloser, ReleasePolicy, WithClose};
/// use embedded_io::Read;
///
/// let released = Cell::new(0);
/// let release = || -> Result<(), Infallible> {
///     released.set(released.get() + 1);
///     Ok(())
/// };
///
/// let mut reader = MultiReadCloser::with_policy(
///     [
///         WithClose::new(&b"abc"[..], &release),
///         WithClose::new(&b"def"[..], &release),
///     ],
///     ReleasePolicy::OnExhaustion,
/// );
///
/// let mut buf = [0u8; 8];
/// assert_eq!(reader.read(&mut buf).unwrap(), 6);
/// assert_eq!(released.get(), 2);
/// reader.close().unwrap();
/// assert_eq!(released.get(), 2);
/// ```
pub struct MultiReadCloser<R: ErrorType> {
    sources: VecDeque<R>,
    policy: ReleasePolicy,
    pending: Option<R::Error>,
}

impl<R: Read + Close> MultiReadCloser<R> {
    /// Create a reader over `sources` that releases them on [`close`](Self::close).
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self::with_policy(sources, ReleasePolicy::default())
    }

    /// Create a reader over `sources` with the given release policy.
    pub fn with_policy<I>(sources: I, policy: ReleasePolicy) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self {
            sources: sources.into_iter().collect(),
            policy,
            pending: None,
        }
    }

    /// The release policy in effect.
    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    /// Change the release policy.
    ///
    /// Meant to be called before the first read; sources exhausted earlier
    /// were already handled under the previous policy.
    pub fn set_policy(&mut self, policy: ReleasePolicy) {
        self.policy = policy;
    }

    /// Fill `buf` as far as the remaining sources allow.
    ///
    /// Same contract as [`MultiReader::fill`](crate::MultiReader::fill); in
    /// addition, under [`ReleasePolicy::OnExhaustion`] a failure to release
    /// an exhausted source ends the call with that failure.
    pub fn fill(&mut self, buf: &mut [u8]) -> Transfer<R::Error> {
        if let Some(e) = self.pending.take() {
            return Transfer::failed(0, e);
        }
        let mut queue = ClosableSources {
            sources: &mut self.sources,
            policy: self.policy,
        };
        engine::fill(&mut queue, buf)
    }

    /// Release every source still held, in order.
    ///
    /// Every source is released even if some fail. Afterwards the reader
    /// holds no sources: reads report end-of-stream and closing again does
    /// nothing. A failure parked by an earlier read is discarded.
    ///
    /// # Errors
    ///
    /// Returns every release failure, in source order, as one [`MultiError`].
    pub fn close(&mut self) -> Result<(), MultiError<R::Error>> {
        self.pending = None;
        let held = self.sources.len();

        let errors: Vec<R::Error> = self
            .sources
            .drain(..)
            .filter_map(|mut source| source.close().err())
            .collect();

        debug!("released {} sources, {} failed", held, errors.len());
        MultiError::new(errors).into_result()
    }

    /// Number of sources not yet exhausted (or released).
    pub fn remaining(&self) -> usize {
        self.sources.len()
    }

    /// Whether every source has been exhausted or released.
    pub fn is_exhausted(&self) -> bool {
        self.sources.is_empty() && self.pending.is_none()
    }

    /// Give up release responsibility and recover the sources still held.
    pub fn into_sources(self) -> Vec<R> {
        self.sources.into()
    }
}

impl<R: Read + Close> ErrorType for MultiReadCloser<R> {
    type Error = R::Error;
}

impl<R: Read + Close> Read for MultiReadCloser<R> {
    /// Read from the sources into `buf`.
    ///
    /// Same contract as the [`MultiReader`](crate::MultiReader) implementation.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let transfer = self.fill(buf);
        engine::settle(&mut self.pending, transfer)
    }
}

/// Queue that releases exhausted sources when the policy asks for it.
struct ClosableSources<'a, R> {
    sources: &'a mut VecDeque<R>,
    policy: ReleasePolicy,
}

impl<R: Read + Close> SourceQueue for ClosableSources<'_, R> {
    type Source = R;

    fn head(&mut self) -> Option<&mut R> {
        self.sources.front_mut()
    }

    fn evict(&mut self) -> Result<(), R::Error> {
        let Some(mut source) = self.sources.pop_front() else {
            return Ok(());
        };
        trace!("source exhausted, {} remaining", self.sources.len());

        match self.policy {
            ReleasePolicy::OnClose => Ok(()),
            ReleasePolicy::OnExhaustion => source.close().inspect_err(|_| {
                debug!("releasing exhausted source failed");
            }),
        }
    }
}

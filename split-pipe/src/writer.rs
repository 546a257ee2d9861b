//! Writing (and closing) one primary sink and any number of secondary sinks
//! as a single sink.

use alloc::vec::Vec;

use embedded_io::{ErrorType, Write};

use crate::close::Close;
use crate::engine::Transfer;
use crate::error::{MultiError, SplitError};

/// What a [`SplitWriter`] does when a secondary sink fails.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondaryErrors {
    /// A failing or short secondary write ends the call with that failure;
    /// later secondaries are skipped. Secondary release failures are
    /// reported by `close`.
    #[default]
    Propagate,
    /// Secondary failures and short writes are skipped over. The primary's
    /// failures are always reported.
    Ignore,
}

/// Duplicates every write to a primary sink and zero or more secondary
/// sinks.
///
/// The primary is written first. If it fails or accepts fewer bytes than
/// given, the call ends there and no secondary is touched. Otherwise each
/// secondary receives the same bytes, in order, subject to the
/// [`SecondaryErrors`] policy. A successful call reports the primary's byte
/// count.
///
/// When every sink implements [`Close`], the writer can also release all of
/// them at once with [`close`](Self::close).
///
/// # Examples
///
/// ```
/// use split_pipe::SplitWriter;
/// use embedded_io::Write;
///
/// let mut writer = SplitWriter::new(Vec::<u8>::new(), [Vec::<u8>::new(), Vec::new()]);
/// writer.write_all(b"hello").unwrap();
///
/// let (primary, secondaries) = writer.into_inner();
/// assert_eq!(primary, b"hello");
/// assert!(secondaries.iter().all(|s| s == b"hello"));
/// ```
pub struct SplitWriter<P, S = P> {
    primary: P,
    secondaries: Vec<S>,
    policy: SecondaryErrors,
}

impl<P, S> SplitWriter<P, S>
where
    P: Write,
    S: Write<Error = P::Error>,
{
    /// Create a writer over `primary` and `secondaries` that reports
    /// secondary failures.
    pub fn new<I>(primary: P, secondaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::with_policy(primary, secondaries, SecondaryErrors::default())
    }

    /// Create a writer with the given secondary error policy.
    pub fn with_policy<I>(primary: P, secondaries: I, policy: SecondaryErrors) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            primary,
            secondaries: secondaries.into_iter().collect(),
            policy,
        }
    }

    /// Write `buf` to every sink and report the exact outcome.
    ///
    /// - Primary failure: zero bytes and the primary's error.
    /// - Primary short write: the primary's count and
    ///   [`SplitError::ShortWrite`]; secondaries are not touched.
    /// - Secondary failure (when propagated): the primary's count and the
    ///   secondary's error.
    /// - Secondary short write (when propagated): the secondary's count and
    ///   [`SplitError::ShortWrite`].
    /// - Otherwise: the primary's count, complete.
    ///
    /// Never reports end-of-stream.
    pub fn write_split(&mut self, buf: &[u8]) -> Transfer<SplitError<P::Error>> {
        let requested = buf.len();

        let written = match self.primary.write(buf) {
            Ok(n) => n,
            Err(e) => return Transfer::failed(0, SplitError::Sink(e)),
        };
        if written < requested {
            debug!("primary short write: {} of {} bytes", written, requested);
            return Transfer::failed(written, SplitError::ShortWrite { written, requested });
        }

        for (index, sink) in self.secondaries.iter_mut().enumerate() {
            let failure = match sink.write(buf) {
                Ok(n) if n < requested => {
                    debug!("secondary {} short write: {} of {} bytes", index, n, requested);
                    Transfer::failed(n, SplitError::ShortWrite { written: n, requested })
                }
                Ok(_) => continue,
                Err(e) => Transfer::failed(written, SplitError::Sink(e)),
            };

            match self.policy {
                SecondaryErrors::Propagate => return failure,
                SecondaryErrors::Ignore => warn!("ignoring write failure on secondary {}", index),
            }
        }

        Transfer::complete(written)
    }

    /// The secondary error policy in effect.
    pub fn policy(&self) -> SecondaryErrors {
        self.policy
    }

    /// Change the secondary error policy.
    pub fn set_policy(&mut self, policy: SecondaryErrors) {
        self.policy = policy;
    }

    /// Borrow the primary sink.
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Borrow the secondary sinks, in order.
    pub fn secondaries(&self) -> &[S] {
        &self.secondaries
    }

    /// Recover the primary and secondary sinks.
    pub fn into_inner(self) -> (P, Vec<S>) {
        (self.primary, self.secondaries)
    }
}

impl<P, S> SplitWriter<P, S>
where
    P: Write + Close,
    S: Write<Error = P::Error> + Close,
{
    /// Release the primary, then every secondary, in order.
    ///
    /// Every sink is released even if some fail. Secondary failures are
    /// dropped under [`SecondaryErrors::Ignore`]; the primary's failure is
    /// always kept. The writer must not be written to afterwards.
    ///
    /// # Errors
    ///
    /// Returns every kept release failure, in sink order, as one
    /// [`MultiError`].
    pub fn close(&mut self) -> Result<(), MultiError<P::Error>> {
        let mut errors = Vec::new();

        if let Err(e) = self.primary.close() {
            errors.push(e);
        }

        for (index, sink) in self.secondaries.iter_mut().enumerate() {
            if let Err(e) = sink.close() {
                match self.policy {
                    SecondaryErrors::Propagate => errors.push(e),
                    SecondaryErrors::Ignore => warn!("ignoring close failure on secondary {}", index),
                }
            }
        }

        debug!(
            "closed {} sinks, {} failed",
            self.secondaries.len() + 1,
            errors.len()
        );
        MultiError::new(errors).into_result()
    }
}

impl<P, S> ErrorType for SplitWriter<P, S>
where
    P: Write,
    S: Write<Error = P::Error>,
{
    type Error = SplitError<P::Error>;
}

impl<P, S> Write for SplitWriter<P, S>
where
    P: Write,
    S: Write<Error = P::Error>,
{
    /// Write `buf` to every sink.
    ///
    /// Returns the primary's count on success. Use
    /// [`write_split`](SplitWriter::write_split) to also see the count that
    /// accompanies a failure.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.write_split(buf).into_result()
    }

    /// Flush the primary, then every secondary, with the same failure
    /// handling as [`write`](Self::write).
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.primary.flush().map_err(SplitError::Sink)?;

        for (index, sink) in self.secondaries.iter_mut().enumerate() {
            if let Err(e) = sink.flush() {
                match self.policy {
                    SecondaryErrors::Propagate => return Err(SplitError::Sink(e)),
                    SecondaryErrors::Ignore => warn!("ignoring flush failure on secondary {}", index),
                }
            }
        }

        Ok(())
    }
}

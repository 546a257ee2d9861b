//! Sequential read engine shared by the composite readers.
//!
//! [`fill`] drains an ordered queue of sources into one destination buffer.
//! A single call keeps reading across source boundaries until the buffer is
//! full or every source is exhausted, so crossing from one source to the next
//! never shortens a read on its own.

use embedded_io::{ErrorType, Read};

/// Outcome of a transfer: how many bytes moved, and how it ended.
///
/// This is the `(count, error)` pair of the composite streams. Unlike
/// `Result<usize, E>` it can report bytes that were moved before a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer<E> {
    /// Bytes moved into (or out of) the caller's buffer.
    pub bytes: usize,
    /// How the transfer ended.
    pub status: TransferStatus<E>,
}

/// How a [`Transfer`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus<E> {
    /// The transfer ended without error.
    Complete,
    /// No further data exists. Only ever reported with zero bytes.
    EndOfStream,
    /// An underlying stream failed; the error is passed through unchanged.
    Failed(E),
}

impl<E> Transfer<E> {
    pub(crate) fn complete(bytes: usize) -> Self {
        Self {
            bytes,
            status: TransferStatus::Complete,
        }
    }

    pub(crate) fn end_of_stream() -> Self {
        Self {
            bytes: 0,
            status: TransferStatus::EndOfStream,
        }
    }

    pub(crate) fn failed(bytes: usize, error: E) -> Self {
        Self {
            bytes,
            status: TransferStatus::Failed(error),
        }
    }

    /// Whether this transfer reports end-of-stream.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self.status, TransferStatus::EndOfStream)
    }

    /// The failure, if the transfer ended with one.
    pub fn error(&self) -> Option<&E> {
        match &self.status {
            TransferStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Collapse into a `Result`, dropping the byte count of a failed transfer.
    ///
    /// End-of-stream becomes `Ok(0)`.
    pub fn into_result(self) -> Result<usize, E> {
        match self.status {
            TransferStatus::Complete | TransferStatus::EndOfStream => Ok(self.bytes),
            TransferStatus::Failed(e) => Err(e),
        }
    }
}

/// An ordered queue of sources the engine drains front to back.
pub(crate) trait SourceQueue {
    type Source: Read;

    /// The current head source, or `None` once every source was evicted.
    fn head(&mut self) -> Option<&mut Self::Source>;

    /// Remove the exhausted head. Implementations may release it first; a
    /// release failure is reported and the head is still removed.
    fn evict(&mut self) -> Result<(), <Self::Source as ErrorType>::Error>;
}

type SourceError<Q> = <<Q as SourceQueue>::Source as ErrorType>::Error;

/// Fill `buf` from the sources in `queue`, in order.
///
/// - With no sources left, reports end-of-stream and touches nothing.
/// - Reads the head until `buf` is full or the head reports end-of-stream,
///   then evicts it and continues with the next source.
/// - A read failure or an eviction failure ends the call immediately with
///   the bytes gathered so far and the failure, unchanged.
/// - Running out of sources after some bytes were gathered is not reported;
///   the caller sees end-of-stream on the next call.
pub(crate) fn fill<Q: SourceQueue>(queue: &mut Q, buf: &mut [u8]) -> Transfer<SourceError<Q>> {
    let mut filled = 0;

    loop {
        let Some(source) = queue.head() else {
            if filled == 0 {
                return Transfer::end_of_stream();
            }
            return Transfer::complete(filled);
        };

        while filled < buf.len() {
            match source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) => return Transfer::failed(filled, e),
            }
        }

        if filled == buf.len() {
            return Transfer::complete(filled);
        }

        if let Err(e) = queue.evict() {
            return Transfer::failed(filled, e);
        }
    }
}

/// Adapts a [`Transfer`] to the `Read::read` contract.
///
/// A failure that arrives after some bytes were gathered is parked in
/// `pending` and the bytes are returned; the next call returns the parked
/// failure before any source is consulted again.
pub(crate) fn settle<E>(pending: &mut Option<E>, transfer: Transfer<E>) -> Result<usize, E> {
    match transfer.status {
        TransferStatus::Complete | TransferStatus::EndOfStream => Ok(transfer.bytes),
        TransferStatus::Failed(e) if transfer.bytes == 0 => Err(e),
        TransferStatus::Failed(e) => {
            debug!("deferring source failure after {} bytes", transfer.bytes);
            *pending = Some(e);
            Ok(transfer.bytes)
        }
    }
}

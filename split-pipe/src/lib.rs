//! Composite streams over `embedded-io`.
//!
//! This crate reads several input streams as one logical stream and fans
//! writes and releases out to several output streams as one logical sink.
//!
//! # Reading
//!
//! - [`MultiReader`] reads its sources one after another. A single `read`
//!   keeps going into the next source when the current one runs dry, so a
//!   call only comes back short once every source is exhausted.
//! - [`MultiReadCloser`] adds release handling: [`close`](MultiReadCloser::close)
//!   releases the sources still held, and [`ReleasePolicy::OnExhaustion`]
//!   releases each source the moment it runs dry.
//! - [`Eof`] is an empty placeholder source.
//!
//! Both readers expose the exact `(count, failure)` outcome of a call through
//! `fill`, which returns a [`Transfer`]. Through [`embedded_io::Read`], a
//! failure that follows some bytes is returned by the next call instead.
//!
//! # Writing
//!
//! - [`SplitWriter`] writes every buffer to a primary sink and then to each
//!   secondary sink. [`SecondaryErrors::Ignore`] makes secondary failures
//!   non-fatal. When all sinks implement [`Close`], [`SplitWriter::close`]
//!   releases them all.
//!
//! # Errors
//!
//! Read and write failures are the underlying stream's own errors. Releasing
//! several streams collects every failure into a [`MultiError`], whose message
//! is the individual messages joined by newlines. A sink that accepts fewer
//! bytes than given without failing is reported as
//! [`SplitError::ShortWrite`].
//!
//! # Quick Start
//!
//! ```
//! use split_pipe::{MultiReader, SplitWriter};
//! use embedded_io::{Read, Write};
//!
//! let mut reader = MultiReader::new([&b"hello, "[..], &b"world"[..]]);
//! let mut buf = [0u8; 32];
//! let n = reader.read(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"hello, world");
//!
//! let mut writer = SplitWriter::new(Vec::<u8>::new(), [Vec::<u8>::new()]);
//! writer.write_all(&buf[..n]).unwrap();
//! let (primary, copies) = writer.into_inner();
//! assert_eq!(primary, copies[0]);
//! ```
//!
//! # Features
//!
//! - `std`: `std::io` bridges (`from_std`, `into_std`)
//! - `log`: Enable logging support
//! - `defmt`: Enable defmt logging for embedded

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

mod close;
mod engine;
mod eof;
mod error;
mod read_closer;
mod reader;
mod writer;

#[cfg(feature = "std")]
mod std_io;

pub use close::{Close, ReadClose, WithClose, WriteClose};
pub use engine::{Transfer, TransferStatus};
pub use eof::Eof;
pub use error::{MultiError, SplitError};
pub use read_closer::{MultiReadCloser, ReleasePolicy};
pub use reader::MultiReader;
pub use writer::{SecondaryErrors, SplitWriter};

// Re-export embedded_io for convenience
pub use embedded_io;

//! Bridges to `std::io`.
//!
//! Sources and sinks from `std` are wrapped with
//! [`FromStd`](embedded_io_adapters::std::FromStd); finished composites are
//! exposed to `std` with [`ToStd`](embedded_io_adapters::std::ToStd), so they
//! work with `std::io::copy` and friends.

use embedded_io::{Read, Write};
use embedded_io_adapters::std::{FromStd, ToStd};

use crate::close::Close;
use crate::read_closer::MultiReadCloser;
use crate::reader::MultiReader;
use crate::writer::SplitWriter;

impl<R: std::io::Read> MultiReader<FromStd<R>> {
    /// Create a reader over `std::io` sources.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_pipe::MultiReader;
    /// use std::io::{Cursor, Read};
    ///
    /// let mut reader = MultiReader::from_std([Cursor::new("abc"), Cursor::new("def")]).into_std();
    /// let mut out = String::new();
    /// reader.read_to_string(&mut out).unwrap();
    /// assert_eq!(out, "abcdef");
    /// ```
    pub fn from_std<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self::new(sources.into_iter().map(FromStd::new))
    }
}

impl<R: Read> MultiReader<R> {
    /// Expose this reader as a `std::io::Read`.
    pub fn into_std(self) -> ToStd<Self> {
        ToStd::new(self)
    }
}

impl<R: Read + Close> MultiReadCloser<R> {
    /// Expose this reader as a `std::io::Read`.
    ///
    /// Release responsibility stays with the wrapper: recover the reader with
    /// [`ToStd::into_inner`] to [`close`](MultiReadCloser::close) it.
    pub fn into_std(self) -> ToStd<Self> {
        ToStd::new(self)
    }
}

impl<P, S> SplitWriter<FromStd<P>, FromStd<S>>
where
    P: std::io::Write,
    S: std::io::Write,
{
    /// Create a writer over `std::io` sinks.
    pub fn from_std<I>(primary: P, secondaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::new(FromStd::new(primary), secondaries.into_iter().map(FromStd::new))
    }
}

impl<P, S> SplitWriter<P, S>
where
    P: Write,
    S: Write<Error = P::Error>,
{
    /// Expose this writer as a `std::io::Write`.
    ///
    /// A short write surfaces as [`std::io::ErrorKind::WriteZero`].
    pub fn into_std(self) -> ToStd<Self> {
        ToStd::new(self)
    }
}

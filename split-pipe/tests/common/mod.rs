//! Scripted streams shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use embedded_io::{ErrorKind, ErrorType, Read, Write};
use split_pipe::Close;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Error raised by a scripted stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault(pub &'static str);

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Fault {}

impl embedded_io::Error for Fault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Call counters and captured output, shared with the test after the stream
/// is handed to a composite.
#[derive(Debug, Default)]
pub struct Probe {
    pub reads: Cell<usize>,
    pub writes: Cell<usize>,
    pub closes: Cell<usize>,
    pub written: RefCell<Vec<u8>>,
}

impl Probe {
    pub fn written(&self) -> Vec<u8> {
        self.written.borrow().clone()
    }
}

/// A stream whose behaviour is scripted up front.
///
/// Reads serve `data`, at most `read_counts[i]` bytes on the i-th call when
/// given. Writes capture into the probe, capped by `write_limit`. Any of the
/// three operations can be made to fail.
#[derive(Default)]
pub struct Scripted {
    data: Vec<u8>,
    pos: usize,
    read_counts: VecDeque<usize>,
    read_error: Option<Fault>,
    write_error: Option<Fault>,
    write_limit: Option<usize>,
    close_error: Option<Fault>,
    probe: Rc<Probe>,
}

impl Scripted {
    pub fn reading(data: &str) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    pub fn sink() -> Self {
        Self::default()
    }

    pub fn read_counts(mut self, counts: &[usize]) -> Self {
        self.read_counts = counts.iter().copied().collect();
        self
    }

    pub fn failing_read(mut self, fault: Fault) -> Self {
        self.read_error = Some(fault);
        self
    }

    pub fn failing_write(mut self, fault: Fault) -> Self {
        self.write_error = Some(fault);
        self
    }

    pub fn write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    pub fn failing_close(mut self, fault: Fault) -> Self {
        self.close_error = Some(fault);
        self
    }

    pub fn probe(&self) -> Rc<Probe> {
        Rc::clone(&self.probe)
    }
}

impl ErrorType for Scripted {
    type Error = Fault;
}

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Fault> {
        self.probe.reads.set(self.probe.reads.get() + 1);
        if let Some(fault) = self.read_error {
            return Err(fault);
        }

        let available = &self.data[self.pos..];
        let cap = self.read_counts.pop_front().unwrap_or(usize::MAX);
        let n = available.len().min(buf.len()).min(cap);
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for Scripted {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Fault> {
        self.probe.writes.set(self.probe.writes.get() + 1);
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.probe.written.borrow_mut().extend_from_slice(&buf[..n]);

        match self.write_error {
            Some(fault) => Err(fault),
            None => Ok(n),
        }
    }

    fn flush(&mut self) -> Result<(), Fault> {
        Ok(())
    }
}

impl Close for Scripted {
    fn close(&mut self) -> Result<(), Fault> {
        self.probe.closes.set(self.probe.closes.get() + 1);
        match self.close_error {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

/// Sources holding "abc", "def", "ghi", "jkl", "mno".
pub fn letters() -> Vec<Scripted> {
    ["abc", "def", "ghi", "jkl", "mno"]
        .into_iter()
        .map(Scripted::reading)
        .collect()
}

/// Read until end-of-stream with a buffer of `size` bytes, collecting every
/// byte and the length of every non-empty read.
pub fn drain<R: Read>(reader: &mut R, size: usize) -> Result<(Vec<u8>, Vec<usize>), R::Error> {
    let mut out = Vec::new();
    let mut reads = Vec::new();
    let mut buf = vec![0u8; size];

    loop {
        match reader.read(&mut buf)? {
            0 => return Ok((out, reads)),
            n => {
                out.extend_from_slice(&buf[..n]);
                reads.push(n);
            }
        }
    }
}

//! Bridges between [`SampleStream`] and `std::io::Read`.

use std::io::{self, Read};

use log::warn;

use crate::dsp::sample::SAMPLE_BYTES;
use crate::error::{Error, Result};
use crate::graph::stream::{read_full, Filled, SampleStream};

/// Wraps any byte reader holding little-endian i16 PCM as a sample stream.
///
/// Every call makes at most one successful read of the inner reader; `Ok(0)`
/// on a non-empty buffer is end of input and `Interrupted` is retried. Only
/// whole samples are handed out. A byte that completes no sample is held
/// until the next call, and dropped if the input ends first.
pub struct ReaderStream<R> {
    inner: R,
    ended: bool,
    carry: Option<u8>,
}

impl<R: Read> ReaderStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            ended: false,
            carry: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Send> SampleStream for ReaderStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        if self.ended {
            return Ok(Filled::end(0));
        }
        let whole = buf.len() - buf.len() % SAMPLE_BYTES;
        if whole == 0 {
            return Ok(Filled::more(0));
        }

        let mut filled = 0;
        if let Some(byte) = self.carry.take() {
            buf[0] = byte;
            filled = 1;
        }

        loop {
            match self.inner.read(&mut buf[filled..whole]) {
                Ok(0) => {
                    self.ended = true;
                    if filled % SAMPLE_BYTES != 0 {
                        warn!("reader: input ended inside a sample, dropping the last byte");
                        filled -= 1;
                    }
                    return Ok(Filled::end(filled));
                }
                Ok(n) => {
                    filled += n;
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    if filled == 1 {
                        self.carry = Some(buf[0]);
                    }
                    return Err(Error::Upstream(e));
                }
            }
        }

        if filled % SAMPLE_BYTES != 0 {
            filled -= 1;
            self.carry = Some(buf[filled]);
        }
        Ok(Filled::more(filled))
    }
}

/// Exposes a sample stream as a plain `std::io::Read` byte source, for
/// `io::copy` into files, pipes or anything else that takes a reader.
///
/// Buffers shorter than one sample are served a byte at a time.
pub struct StreamReader<S> {
    inner: S,
    ended: bool,
    carry: Option<u8>,
}

impl<S: SampleStream> StreamReader<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ended: false,
            carry: None,
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SampleStream> Read for StreamReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(byte) = self.carry.take() {
            buf[0] = byte;
            return Ok(1);
        }
        if self.ended {
            return Ok(0);
        }

        if buf.len() < SAMPLE_BYTES {
            let mut sample = [0u8; SAMPLE_BYTES];
            let r = read_full(&mut self.inner, &mut sample)?;
            self.ended = r.is_end();
            if r.bytes == 0 {
                return Ok(0);
            }
            buf[0] = sample[0];
            if r.bytes > 1 {
                self.carry = Some(sample[1]);
            }
            return Ok(1);
        }

        loop {
            let r = self.inner.read(buf)?;
            self.ended = r.is_end();
            if r.bytes > 0 || self.ended {
                return Ok(r.bytes);
            }
        }
    }
}

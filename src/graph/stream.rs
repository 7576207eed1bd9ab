use crate::dsp::sample::SAMPLE_BYTES;
use crate::error::Result;

/// Whether a stream has more data after this read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// More data may follow. A read may still return zero bytes ("nothing
    /// this call, try again").
    More,
    /// No more data, ever. Bytes returned alongside are still valid.
    End,
}

/// Result of a single [`SampleStream::read`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filled {
    /// Bytes written at the start of the caller's buffer.
    pub bytes: usize,
    pub status: ReadStatus,
}

impl Filled {
    pub const fn more(bytes: usize) -> Self {
        Self {
            bytes,
            status: ReadStatus::More,
        }
    }

    pub const fn end(bytes: usize) -> Self {
        Self {
            bytes,
            status: ReadStatus::End,
        }
    }

    pub fn is_end(&self) -> bool {
        self.status == ReadStatus::End
    }
}

/// Core trait for pull-based sample streams
///
/// A read fills the front of `buf` with whole little-endian i16 samples and
/// reports how many bytes it wrote. Sources never split a sample: with an odd
/// buffer the last byte is left untouched, and a buffer shorter than one
/// sample yields `Filled::more(0)`.
///
/// Once a stream has returned [`ReadStatus::End`] every later read returns
/// `Filled::end(0)`.
pub trait SampleStream: Send {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled>;
}

/// Heap-allocated stream for heterogeneous composition.
pub type BoxedStream = Box<dyn SampleStream>;

/// Allow boxed streams to be used as streams (for dynamic dispatch)
impl<S: SampleStream + ?Sized> SampleStream for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        (**self).read(buf)
    }
}

impl<S: SampleStream + ?Sized> SampleStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        (**self).read(buf)
    }
}

/// Keep reading until `buf` is full or the stream ends.
///
/// Returns fewer bytes than `buf.len()` only together with `End`, or when the
/// remainder is smaller than one sample and the stream will not split one.
pub fn read_full<S: SampleStream + ?Sized>(stream: &mut S, buf: &mut [u8]) -> Result<Filled> {
    let mut filled = 0;
    while filled < buf.len() {
        let r = stream.read(&mut buf[filled..])?;
        filled += r.bytes;
        if r.is_end() {
            return Ok(Filled::end(filled));
        }
        if r.bytes == 0 && buf.len() - filled < SAMPLE_BYTES {
            break;
        }
    }
    Ok(Filled::more(filled))
}

/// Drain a stream into memory.
pub fn read_to_end<S: SampleStream + ?Sized>(stream: &mut S) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let r = stream.read(&mut chunk)?;
        out.extend_from_slice(&chunk[..r.bytes]);
        if r.is_end() {
            return Ok(out);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Samples, Scripted, Step};
    use super::*;
    use crate::dsp::sample::decode_all;

    #[test]
    fn read_full_spans_partial_reads() {
        let mut s = Samples::chunked(&[1, 2, 3, 4], 1);
        let mut buf = [0u8; 6];
        let r = read_full(&mut s, &mut buf).unwrap();
        assert_eq!(r, Filled::more(6));
        assert_eq!(decode_all(&buf), vec![1, 2, 3]);

        let r = read_full(&mut s, &mut buf).unwrap();
        assert_eq!(r, Filled::end(2));
    }

    #[test]
    fn read_full_stops_before_splitting_a_sample() {
        let mut s = Samples::new(&[7, 8, 9]);
        let mut buf = [0xaau8; 5];
        let r = read_full(&mut s, &mut buf).unwrap();
        assert_eq!(r, Filled::more(4));
        assert_eq!(buf[4], 0xaa, "trailing byte must stay untouched");
    }

    #[test]
    fn read_to_end_collects_everything() {
        let mut s = Scripted::new(vec![
            Step::Data(vec![1, 0]),
            Step::Data(vec![]),
            Step::DataEnd(vec![2, 0, 3, 0]),
        ]);
        let bytes = read_to_end(&mut s).unwrap();
        assert_eq!(decode_all(&bytes), vec![1, 2, 3]);
    }

    #[test]
    fn read_to_end_propagates_errors() {
        let mut s = Scripted::new(vec![
            Step::Data(vec![1, 0]),
            Step::Fail(std::io::ErrorKind::ConnectionReset),
        ]);
        assert!(read_to_end(&mut s).is_err());
    }

    #[test]
    fn boxed_streams_delegate() {
        let mut s: BoxedStream = Box::new(Samples::new(&[5]));
        let bytes = read_to_end(&mut s).unwrap();
        assert_eq!(decode_all(&bytes), vec![5]);
    }
}

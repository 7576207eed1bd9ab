use std::collections::VecDeque;

use crate::error::Result;
use crate::graph::stream::{Filled, SampleStream};

/// Plays streams end to end: the first is drained completely before a single
/// byte is drawn from the next.
///
/// One read may cross a seam, so callers see a single continuous stream.
/// The chain ends when its last stream ends.
pub struct Chain<S> {
    streams: VecDeque<S>,
}

impl<S> Chain<S> {
    pub fn new(streams: Vec<S>) -> Self {
        Self {
            streams: streams.into(),
        }
    }

    /// Append a stream to the end of the chain.
    pub fn push(&mut self, stream: S) {
        self.streams.push_back(stream);
    }

    /// Streams not yet drained, including the one currently playing.
    pub fn pending(&self) -> usize {
        self.streams.len()
    }
}

impl<S: SampleStream> SampleStream for Chain<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        let mut written = 0;

        while let Some(current) = self.streams.front_mut() {
            if written == buf.len() {
                break;
            }

            let r = current.read(&mut buf[written..])?;
            written += r.bytes;

            if r.is_end() {
                self.streams.pop_front();
            } else if r.bytes == 0 {
                // Nothing this call; don't skip ahead of a live stream
                break;
            }
        }

        if self.streams.is_empty() {
            Ok(Filled::end(written))
        } else {
            Ok(Filled::more(written))
        }
    }
}

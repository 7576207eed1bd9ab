use log::{debug, warn};

use crate::dsp::sample::{self, read_sample, write_sample, EQUILIBRIUM, SAMPLE_BYTES};
use crate::error::Result;
use crate::graph::stream::{read_full, Filled, SampleStream};

/*
N-way Mixing
============

Combine sums simultaneous voices, slot by slot:

    voice A:   a0   a1   a2   a3   (end)
    voice B:   b0   b1   (end)
    voice C:   c0   c1   c2   (end)
               ──────────────────
    output:  a0+b0+c0  a1+b1+c1  a2+c2  a3  (end)

For every output slot one sample (2 bytes) is pulled from each input that
hasn't ended. Inputs that have ended contribute silence and are never read
again. The mix ends at the first slot where every input has ended, so its
length is that of the longest input.

Sums use saturating i16 addition (see `dsp::sample::add`): chords at full
scale clip flat instead of wrapping around. Attenuate voices with Sustain
first to keep headroom.

Short reads:
------------

An input that hands back a single byte and then ends can't form a sample.
That byte is dropped and the input is treated as ended, exactly like an
input that ended cleanly. A framing bug upstream therefore shows up as
early silence, not as an error.

Errors:
-------

Any upstream error aborts the read: the slot being assembled is discarded,
the error is returned, and the mix is halted (later reads report End).
*/

pub struct Combine<S> {
    inputs: Vec<Input<S>>,
    halted: bool,
}

struct Input<S> {
    stream: S,
    ended: bool,
}

impl<S> Combine<S> {
    pub fn new(streams: Vec<S>) -> Self {
        debug!("combine: {} inputs", streams.len());
        Self {
            inputs: streams
                .into_iter()
                .map(|stream| Input {
                    stream,
                    ended: false,
                })
                .collect(),
            halted: false,
        }
    }

    /// Number of inputs (fixed at construction).
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    fn exhausted(&self) -> bool {
        self.halted || self.inputs.iter().all(|input| input.ended)
    }
}

impl<S: SampleStream> Combine<S> {
    /// Pull one sample from every live input and sum them.
    ///
    /// Returns `None` when no input produced a sample for this slot.
    fn next_slot(&mut self) -> Result<Option<i16>> {
        let mut total = EQUILIBRIUM;
        let mut produced = false;

        for input in self.inputs.iter_mut().filter(|input| !input.ended) {
            let mut bytes = [0u8; SAMPLE_BYTES];
            let r = read_full(&mut input.stream, &mut bytes)?;

            if r.bytes == SAMPLE_BYTES {
                produced = true;
                total = sample::add(total, read_sample(&bytes));
            } else if r.bytes > 0 {
                warn!("combine: input returned a partial sample, treating it as ended");
            }

            // Anything short of a whole sample ends this input for good
            if r.is_end() || r.bytes < SAMPLE_BYTES {
                input.ended = true;
            }
        }

        Ok(produced.then_some(total))
    }
}

impl<S: SampleStream> SampleStream for Combine<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Filled> {
        if self.exhausted() {
            return Ok(Filled::end(0));
        }

        let mut written = 0;
        for out in buf.chunks_exact_mut(SAMPLE_BYTES) {
            let slot = match self.next_slot() {
                Ok(slot) => slot,
                Err(e) => {
                    self.halted = true;
                    return Err(e);
                }
            };

            match slot {
                Some(value) => {
                    write_sample(out, value);
                    written += SAMPLE_BYTES;
                }
                None => return Ok(Filled::end(written)),
            }

            if self.exhausted() {
                return Ok(Filled::end(written));
            }
        }

        Ok(Filled::more(written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::sample::decode_all;
    use crate::error::Error;
    use crate::graph::extensions::StreamExt;
    use crate::graph::oscillator::Oscillator;
    use crate::graph::stream::testing::{Samples, Scripted, Step};
    use crate::graph::stream::{read_to_end, BoxedStream};
    use crate::graph::sustain::Sustain;
    use std::time::Duration;

    fn mix(streams: Vec<Samples>) -> Vec<i16> {
        decode_all(&read_to_end(&mut Combine::new(streams)).unwrap())
    }

    #[test]
    fn empty_mix_ends_immediately() {
        let mut c: Combine<Samples> = Combine::new(Vec::new());
        let mut buf = [0u8; 8];
        assert_eq!(c.read(&mut buf).unwrap(), Filled::end(0));
    }

    #[test]
    fn sums_slot_by_slot() {
        let out = mix(vec![Samples::new(&[1, 2, 3]), Samples::new(&[10, 20, 30])]);
        assert_eq!(out, vec![11, 22, 33]);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let out = mix(vec![
            Samples::new(&[32000, -32000, 100]),
            Samples::new(&[32000, -32000, -50]),
        ]);
        assert_eq!(out, vec![32767, -32768, 50]);
    }

    #[test]
    fn length_is_the_longest_input() {
        let out = mix(vec![
            Samples::new(&[1, 1]),
            Samples::new(&[5, 5, 5, 5, 5]),
            Samples::new(&[100, 100, 100]),
        ]);
        assert_eq!(out, vec![106, 106, 105, 5, 5]);
    }

    #[test]
    fn tail_holds_only_the_longer_oscillator() {
        let short = Oscillator::square(44_100, 100.0, Duration::from_millis(10)).unwrap();
        let long = Oscillator::sine(44_100, 100.0, Duration::from_millis(20)).unwrap();
        let mut reference = Oscillator::sine(44_100, 100.0, Duration::from_millis(20)).unwrap();
        let long_alone = decode_all(&read_to_end(&mut reference).unwrap());

        let inputs: Vec<BoxedStream> = vec![short.boxed(), long.boxed()];
        let out = decode_all(&read_to_end(&mut Combine::new(inputs)).unwrap());

        assert_eq!(out.len(), 882);
        assert_eq!(&out[441..], &long_alone[441..]);
    }

    #[test]
    fn opposite_phase_cancels() {
        // A square wave and its negation (sustain can't negate, so build the
        // inverse from the same samples)
        let square = decode_all(
            &read_to_end(&mut Oscillator::square(44_100, 220.0, Duration::from_millis(50)).unwrap())
                .unwrap(),
        );
        let inverted: Vec<i16> = square.iter().map(|&v| -v).collect();
        let out = mix(vec![Samples::new(&square), Samples::new(&inverted)]);
        assert_eq!(out.len(), square.len());
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn sine_half_period_shift_cancels() {
        // Period 100 samples, so skipping 50 is a phase shift of π
        let full = decode_all(
            &read_to_end(&mut Oscillator::sine(10_000, 100.0, Duration::from_millis(100)).unwrap())
                .unwrap(),
        );
        let shifted = &full[50..];
        let out = mix(vec![Samples::new(&full[..shifted.len()]), Samples::new(shifted)]);
        assert!(
            out.iter().all(|&v| v.abs() <= 1),
            "sine and its π-shifted copy should cancel"
        );
    }

    #[test]
    fn end_comes_with_the_final_slots() {
        let mut c = Combine::new(vec![Samples::new(&[1, 2, 3]), Samples::new(&[1])]);
        let mut buf = [0u8; 16];
        assert_eq!(c.read(&mut buf).unwrap(), Filled::end(6));
        assert_eq!(decode_all(&buf[..6]), vec![2, 2, 3]);
        assert_eq!(c.read(&mut buf).unwrap(), Filled::end(0));
    }

    #[test]
    fn partial_reads_per_input_are_reassembled() {
        let out = mix(vec![
            Samples::chunked(&[1, 2, 3, 4], 1),
            Samples::chunked(&[10, 20, 30, 40], 3),
        ]);
        assert_eq!(out, vec![11, 22, 33, 44]);
    }

    #[test]
    fn small_and_odd_buffers() {
        let mut c = Combine::new(vec![Samples::new(&[1, 2]), Samples::new(&[3, 4])]);
        let mut one = [0u8; 1];
        assert_eq!(c.read(&mut one).unwrap(), Filled::more(0));

        let mut three = [0xaau8; 3];
        assert_eq!(c.read(&mut three).unwrap(), Filled::more(2));
        assert_eq!(read_sample(&three), 4);
        assert_eq!(three[2], 0xaa);

        assert_eq!(c.read(&mut three).unwrap(), Filled::end(2));
        assert_eq!(read_sample(&three), 6);
    }

    #[test]
    fn short_read_counts_as_exhausted() {
        // One whole sample, then a lone byte and end: the byte is dropped and
        // the input stays silent even though it never errored
        let framed = Scripted::new(vec![Step::Data(vec![7, 0]), Step::DataEnd(vec![9])]);
        let steady = Samples::new(&[1, 1, 1]);

        let inputs: Vec<BoxedStream> = vec![Box::new(framed), Box::new(steady)];
        let out = decode_all(&read_to_end(&mut Combine::new(inputs)).unwrap());
        assert_eq!(out, vec![8, 1, 1]);
    }

    #[test]
    fn errors_propagate_and_halt() {
        let failing = Scripted::new(vec![
            Step::Data(vec![1, 0]),
            Step::Fail(std::io::ErrorKind::BrokenPipe),
        ]);
        let steady = Samples::new(&[1, 1, 1, 1]);
        let inputs: Vec<BoxedStream> = vec![Box::new(failing), Box::new(steady)];
        let mut c = Combine::new(inputs);

        let mut buf = [0u8; 2];
        assert_eq!(c.read(&mut buf).unwrap(), Filled::more(2));
        assert_eq!(read_sample(&buf), 2);

        assert!(matches!(c.read(&mut buf), Err(Error::Upstream(_))));
        assert_eq!(c.read(&mut buf).unwrap(), Filled::end(0));
    }

    #[test]
    fn error_discards_the_slot_being_assembled() {
        // The healthy input is read first for every slot, so its sample is
        // already pulled when the second input fails
        let steady = Samples::new(&[5, 5, 5]);
        let failing = Scripted::new(vec![
            Step::Data(vec![1, 0]),
            Step::Fail(std::io::ErrorKind::BrokenPipe),
        ]);
        let inputs: Vec<BoxedStream> = vec![Box::new(steady), Box::new(failing)];
        let mut c = Combine::new(inputs);

        let mut first = [0u8; 2];
        assert_eq!(c.read(&mut first).unwrap(), Filled::more(2));
        assert_eq!(read_sample(&first), 6);

        let mut buf = [0xaau8; 4];
        assert!(matches!(c.read(&mut buf), Err(Error::Upstream(_))));
        assert_eq!(buf, [0xaa; 4], "no partial sum may be written");
        assert_eq!(c.read(&mut buf).unwrap(), Filled::end(0));
    }

    #[test]
    fn sustained_chord_stays_in_range() {
        let voice = |f| {
            let osc = Oscillator::square(44_100, f, Duration::from_millis(50)).unwrap();
            Sustain::new(osc, 0.4).unwrap()
        };
        let mut chord = Combine::new(vec![voice(261.63), voice(329.63), voice(392.0)]);
        let out = decode_all(&read_to_end(&mut chord).unwrap());
        assert_eq!(out.len(), 2205);
        assert!(out.iter().any(|&v| v == i16::MAX), "three voices at 0.4 should clip");
    }
}

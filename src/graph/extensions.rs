use crate::error::Result;
use crate::graph::{
    chain::Chain,
    combine::Combine,
    stream::{BoxedStream, SampleStream},
    sustain::Sustain,
};

pub trait StreamExt: SampleStream + Sized {
    fn sustain(self, percentage: f64) -> Result<Sustain<Self>> {
        Sustain::new(self, percentage)
    }

    fn boxed(self) -> BoxedStream
    where
        Self: 'static,
    {
        Box::new(self)
    }

    /// Play `next` after this stream ends.
    fn chain<N: SampleStream + 'static>(self, next: N) -> Chain<BoxedStream>
    where
        Self: 'static,
    {
        Chain::new(vec![self.boxed(), next.boxed()])
    }

    /// Sum this stream with `other`.
    fn mix<N: SampleStream + 'static>(self, other: N) -> Combine<BoxedStream>
    where
        Self: 'static,
    {
        Combine::new(vec![self.boxed(), other.boxed()])
    }
}

impl<T: SampleStream> StreamExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::sample::decode_all;
    use crate::graph::oscillator::Oscillator;
    use crate::graph::silence::Silence;
    use crate::graph::stream::read_to_end;
    use std::time::Duration;

    #[test]
    fn fluent_voice() {
        // Delayed entry: 10 samples of rest, then a quieter square
        let mut voice = Silence::samples(10)
            .chain(
                Oscillator::square(1_000, 10.0, Duration::from_millis(20))
                    .unwrap()
                    .sustain(0.5)
                    .unwrap(),
            )
            .mix(Silence::samples(40));

        let out = decode_all(&read_to_end(&mut voice).unwrap());
        assert_eq!(out.len(), 40);
        assert!(out[..10].iter().all(|&v| v == 0));
        assert!(out[10..30].iter().all(|&v| v == 16383));
        assert!(out[30..].iter().all(|&v| v == 0));
    }
}

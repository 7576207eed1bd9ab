//! Real-time playback of a sample stream on the default output device.

use std::fmt;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, error, warn};
use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::sample::{read_sample, SAMPLE_BYTES};
use crate::error::Error;
use crate::graph::stream::{read_full, SampleStream};
use crate::io::pcm8::{unsigned8_to_f32, Unsigned8};
use crate::{BUFFER_SIZE_BYTES, SAMPLE_RATE};

/// How long the feeding thread sleeps while the ring is full.
const FULL_BACKOFF: Duration = Duration::from_millis(1);
/// Extra wait after the ring drains so the device plays its last buffer.
const DEVICE_TAIL: Duration = Duration::from_millis(100);

/// Sample width handed to the device.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// Signed 16-bit, the native stream format
    #[default]
    Sixteen,
    /// Unsigned 8-bit centered at 127 (lo-fi)
    Eight,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    /// Bytes of 16-bit PCM pulled from the stream per chunk
    pub buffer_size_bytes: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bit_depth: BitDepth::Sixteen,
            buffer_size_bytes: BUFFER_SIZE_BYTES,
        }
    }
}

impl PlaybackConfig {
    /// Samples per pulled chunk.
    pub fn chunk_samples(&self) -> usize {
        (self.buffer_size_bytes / SAMPLE_BYTES).max(1)
    }

    /// Ring capacity between the pulling thread and the device callback.
    fn ring_capacity(&self) -> usize {
        (self.chunk_samples() * 4).max(self.sample_rate as usize / 4)
    }
}

#[derive(Debug)]
pub enum PlaybackError {
    NoDevice,
    DeviceInit(cpal::DefaultStreamConfigError),
    StreamCreate(cpal::BuildStreamError),
    Playback(cpal::PlayStreamError),
    /// The stream being played failed
    Stream(Error),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NoDevice => write!(f, "no default output device available"),
            PlaybackError::DeviceInit(e) => write!(f, "failed to fetch default output config: {e}"),
            PlaybackError::StreamCreate(e) => write!(f, "failed to build output stream: {e}"),
            PlaybackError::Playback(e) => write!(f, "failed to start playback: {e}"),
            PlaybackError::Stream(e) => write!(f, "stream failed during playback: {e}"),
        }
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaybackError::NoDevice => None,
            PlaybackError::DeviceInit(e) => Some(e),
            PlaybackError::StreamCreate(e) => Some(e),
            PlaybackError::Playback(e) => Some(e),
            PlaybackError::Stream(e) => Some(e),
        }
    }
}

impl From<Error> for PlaybackError {
    fn from(e: Error) -> Self {
        PlaybackError::Stream(e)
    }
}

/// Progress published to a monitor (allocation-free, Copy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    /// Samples consumed by the device so far
    pub samples_played: u64,
    pub finished: bool,
}

/// Player side of a monitor tap.
pub struct Monitor {
    samples: Producer<f32>,
    status: Producer<PlaybackStatus>,
    last: PlaybackStatus,
}

/// Visualization side of a monitor tap.
pub struct MonitorReceiver {
    pub samples: Consumer<f32>,
    pub status: Consumer<PlaybackStatus>,
}

/// Create a monitor tap buffering up to `capacity` samples.
pub fn monitor(capacity: usize) -> (Monitor, MonitorReceiver) {
    let (samples_tx, samples_rx) = RingBuffer::new(capacity);
    let (status_tx, status_rx) = RingBuffer::new(64);
    (
        Monitor {
            samples: samples_tx,
            status: status_tx,
            last: PlaybackStatus::default(),
        },
        MonitorReceiver {
            samples: samples_rx,
            status: status_rx,
        },
    )
}

impl Monitor {
    /// Copy samples without blocking; returns how many didn't fit.
    fn tap(&mut self, samples: &[f32]) -> usize {
        let mut dropped = 0;
        for &s in samples {
            if self.samples.push(s).is_err() {
                dropped += 1;
            }
        }
        dropped
    }

    fn publish(&mut self, status: PlaybackStatus) {
        self.last = status;
        // Only the latest status matters, a full ring just skips this one
        let _ = self.status.push(status);
    }

    /// Mark playback as over, keeping the last reported progress.
    fn finish(&mut self) {
        self.publish(PlaybackStatus {
            finished: true,
            ..self.last
        });
    }
}

/// Pulls 16-bit or 8-bit PCM from a stream and converts it to device floats.
enum Source<S> {
    Sixteen(S),
    Eight(Unsigned8<S>),
}

impl<S: SampleStream> Source<S> {
    /// Fill `out` with the next chunk; returns `true` once the stream ended.
    fn next_chunk(&mut self, bytes: &mut [u8], out: &mut Vec<f32>) -> Result<bool, Error> {
        out.clear();
        match self {
            Source::Sixteen(stream) => {
                let r = read_full(stream, bytes)?;
                out.extend(
                    bytes[..r.bytes]
                        .chunks_exact(SAMPLE_BYTES)
                        .map(|s| read_sample(s) as f32 / 32768.0),
                );
                Ok(r.is_end())
            }
            Source::Eight(reader) => {
                // One byte per sample, so half the bytes for the same samples
                let len = bytes.len();
                let narrow = &mut bytes[..(len / SAMPLE_BYTES).max(1)];
                let n = reader.read(narrow)?;
                out.extend(narrow[..n].iter().map(|&b| unsigned8_to_f32(b)));
                Ok(n == 0)
            }
        }
    }
}

/// Plays sample streams through cpal.
///
/// The calling thread pulls from the stream and pushes into a lock-free ring;
/// the device callback pops from it, copying mono to every channel and
/// padding underruns with silence.
pub struct Player {
    config: PlaybackConfig,
    monitor: Option<Monitor>,
    stop: Arc<AtomicBool>,
}

impl Player {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            monitor: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Also send every sample and progress updates to `monitor`.
    pub fn with_monitor(mut self, monitor: Monitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Setting this flag ends the current `play` call early.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Play `stream` to the end. Blocks until the device has drained.
    ///
    /// A monitor, if any, is told playback finished whether or not it
    /// succeeded.
    pub fn play<S: SampleStream>(&mut self, stream: S) -> Result<(), PlaybackError> {
        let result = self.drive(stream);
        self.conclude(result)
    }

    fn conclude(&mut self, result: Result<(), PlaybackError>) -> Result<(), PlaybackError> {
        if let Err(e) = &result {
            debug!("player: stopping on error: {e}");
        }
        if let Some(monitor) = &mut self.monitor {
            monitor.finish();
        }
        result
    }

    fn drive<S: SampleStream>(&mut self, stream: S) -> Result<(), PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoDevice)?;
        let supported = device
            .default_output_config()
            .map_err(PlaybackError::DeviceInit)?;

        let channels = supported.channels() as usize;
        let stream_config = cpal::StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let capacity = self.config.ring_capacity();
        let (mut producer, mut consumer) = RingBuffer::<f32>::new(capacity);

        let played = Arc::new(AtomicU64::new(0));
        let underruns = Arc::new(AtomicU64::new(0));
        let feeding = Arc::new(AtomicBool::new(true));

        debug!(
            "player: {} Hz, {} channels, {:?}, ring of {capacity} samples",
            self.config.sample_rate, channels, self.config.bit_depth
        );

        let output = {
            let played = played.clone();
            let underruns = underruns.clone();
            let feeding = feeding.clone();
            device
                .build_output_stream(
                    &stream_config,
                    move |data: &mut [f32], _| {
                        let mut popped = 0;
                        for frame in data.chunks_mut(channels) {
                            let s = match consumer.pop() {
                                Ok(s) => {
                                    popped += 1;
                                    s
                                }
                                Err(_) => {
                                    if feeding.load(Ordering::Relaxed) {
                                        underruns.fetch_add(1, Ordering::Relaxed);
                                    }
                                    0.0
                                }
                            };
                            // Copy to output (mono to all channels)
                            frame.fill(s);
                        }
                        played.fetch_add(popped, Ordering::Relaxed);
                    },
                    |err| error!("audio stream error: {err}"),
                    None,
                )
                .map_err(PlaybackError::StreamCreate)?
        };

        let mut source = match self.config.bit_depth {
            BitDepth::Sixteen => Source::Sixteen(stream),
            BitDepth::Eight => Source::Eight(Unsigned8::new(stream)),
        };
        let mut bytes = vec![0u8; self.config.chunk_samples() * SAMPLE_BYTES];
        let mut chunk = Vec::with_capacity(self.config.chunk_samples());
        let mut dropped = 0;
        let mut started = false;

        loop {
            if self.stop.load(Ordering::Relaxed) {
                debug!("player: stopped early");
                break;
            }

            let ended = source.next_chunk(&mut bytes, &mut chunk)?;

            for &s in &chunk {
                while producer.push(s).is_err() {
                    if !started {
                        output.play().map_err(PlaybackError::Playback)?;
                        started = true;
                    }
                    if self.stop.load(Ordering::Relaxed) {
                        break;
                    }
                    thread::sleep(FULL_BACKOFF);
                }
            }

            if let Some(monitor) = &mut self.monitor {
                dropped += monitor.tap(&chunk);
                monitor.publish(PlaybackStatus {
                    samples_played: played.load(Ordering::Relaxed),
                    finished: false,
                });
            }

            if ended {
                break;
            }
        }

        // Short streams never fill the ring
        if !started {
            output.play().map_err(PlaybackError::Playback)?;
        }
        feeding.store(false, Ordering::Relaxed);

        while producer.slots() < capacity && !self.stop.load(Ordering::Relaxed) {
            if let Some(monitor) = &mut self.monitor {
                monitor.publish(PlaybackStatus {
                    samples_played: played.load(Ordering::Relaxed),
                    finished: false,
                });
            }
            thread::sleep(Duration::from_millis(10));
        }
        thread::sleep(DEVICE_TAIL);
        drop(output);

        let underruns = underruns.load(Ordering::Relaxed);
        if underruns > 0 {
            warn!("player: {underruns} samples of underrun padded with silence");
        }
        if dropped > 0 {
            warn!("player: monitor fell behind, {dropped} samples not shown");
        }

        if let Some(monitor) = &mut self.monitor {
            monitor.publish(PlaybackStatus {
                samples_played: played.load(Ordering::Relaxed),
                finished: false,
            });
        }
        Ok(())
    }
}

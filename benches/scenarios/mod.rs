//! Real-world scenario benchmarks.
//!
//! These render complete scores the way the demos do.

mod score;

pub use score::bench_score;

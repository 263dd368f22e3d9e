use std::thread;
use std::time::Duration;

use crate::dynamics::state::Sample;
use crate::sim::runner::Outcome;

// ---------------------------------------------------------------------------
// Sample consumers
// ---------------------------------------------------------------------------

/// Trait for trajectory consumers (plots, tables, exporters).
///
/// Implement this to receive samples as the integrator produces them.
pub trait SampleSink {
    /// Called once per sample, in time order.
    fn accept(&mut self, sample: &Sample);

    /// Called once after the landing sample has been accepted.
    fn finish(&mut self, _outcome: &Outcome) {}
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn accept(&mut self, sample: &Sample) {
        (**self).accept(sample)
    }

    fn finish(&mut self, outcome: &Outcome) {
        (**self).finish(outcome)
    }
}

/// Collects every sample (bulk delivery).
#[derive(Debug, Default)]
pub struct Recorder {
    pub samples: Vec<Sample>,
    pub finished: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// (x, y) pairs, ready for a line plot.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.pos.x, s.pos.y]).collect()
    }
}

impl SampleSink for Recorder {
    fn accept(&mut self, sample: &Sample) {
        self.samples.push(*sample);
    }

    fn finish(&mut self, _outcome: &Outcome) {
        self.finished = true;
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F: FnMut(&Sample)>(pub F);

impl<F: FnMut(&Sample)> SampleSink for FnSink<F> {
    fn accept(&mut self, sample: &Sample) {
        (self.0)(sample)
    }
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(1);

/// How fast samples are handed to a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// As fast as they are computed.
    #[default]
    Immediate,
    /// Pause after each sample, for animated drawing.
    Animated(Duration),
}

impl Pacing {
    pub fn from_flag(animate: bool, delay: Duration) -> Self {
        if animate {
            Pacing::Animated(delay)
        } else {
            Pacing::Immediate
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Pacing::Immediate => Duration::ZERO,
            Pacing::Animated(d) => *d,
        }
    }
}

/// Wraps a sink and sleeps after every accepted sample.
pub struct Paced<S> {
    inner: S,
    pacing: Pacing,
}

impl<S: SampleSink> Paced<S> {
    pub fn new(inner: S, pacing: Pacing) -> Self {
        Self { inner, pacing }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SampleSink> SampleSink for Paced<S> {
    fn accept(&mut self, sample: &Sample) {
        self.inner.accept(sample);
        if let Pacing::Animated(delay) = self.pacing {
            thread::sleep(delay);
        }
    }

    fn finish(&mut self, outcome: &Outcome) {
        self.inner.finish(outcome)
    }
}

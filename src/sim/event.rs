use crate::dynamics::state::Sample;
use crate::sim::runner::Outcome;
use crate::sim::sink::SampleSink;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Apex,
    Impact,
}

/// A discrete event, stamped with the sample it refers to.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub kind: EventKind,
    pub sample: Sample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    /// Returns the event kind and which of the two samples it belongs to.
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<(EventKind, Sample)>;
}

/// Detects the apex (vertical speed going from positive to non-positive).
///
/// Position is advanced with the updated velocity, so the highest sample is
/// the last one still climbing: the event is stamped with `prev`.
pub struct ApexDetector;

impl EventDetector for ApexDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<(EventKind, Sample)> {
        if prev.vel.y > 0.0 && current.vel.y <= 0.0 {
            Some((EventKind::Apex, *prev))
        } else {
            None
        }
    }
}

/// Detects the crossing of the ground plane.
pub struct ImpactDetector;

impl EventDetector for ImpactDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<(EventKind, Sample)> {
        if !prev.is_below_ground() && current.is_below_ground() {
            Some((EventKind::Impact, *current))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Event log sink
// ---------------------------------------------------------------------------

/// Sink that runs a set of detectors over the sample stream.
pub struct EventLog {
    detectors: Vec<Box<dyn EventDetector>>,
    prev: Option<Sample>,
    pub events: Vec<FlightEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { detectors: Vec::new(), prev: None, events: Vec::new() }
    }

    /// Apex and impact detection.
    pub fn standard() -> Self {
        Self::new().with(ApexDetector).with(ImpactDetector)
    }

    pub fn with(mut self, detector: impl EventDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn first(&self, kind: &EventKind) -> Option<&FlightEvent> {
        self.events.iter().find(|e| &e.kind == kind)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSink for EventLog {
    fn accept(&mut self, sample: &Sample) {
        if let Some(prev) = self.prev {
            for det in self.detectors.iter_mut() {
                if let Some((kind, at)) = det.check(&prev, sample) {
                    self.events.push(FlightEvent { kind, sample: at });
                }
            }
        }
        self.prev = Some(*sample);
    }

    fn finish(&mut self, _outcome: &Outcome) {
        self.prev = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_sample(step: usize, alt: f64, vy: f64) -> Sample {
        Sample {
            step,
            time: step as f64 * 0.01,
            pos: Vector2::new(0.0, alt),
            vel: Vector2::new(1.0, vy),
        }
    }

    #[test]
    fn apex_detected_on_last_climbing_sample() {
        let mut det = ApexDetector;
        let prev = make_sample(4, 0.5, 0.1);
        let curr = make_sample(5, 0.499, -0.05);
        let (kind, at) = det.check(&prev, &curr).unwrap();
        assert_eq!(kind, EventKind::Apex);
        assert_eq!(at.step, 4);
    }

    #[test]
    fn impact_detected_below_ground() {
        let mut det = ImpactDetector;
        let prev = make_sample(9, 0.01, -2.0);
        let curr = make_sample(10, -0.01, -2.0);
        let (kind, at) = det.check(&prev, &curr).unwrap();
        assert_eq!(kind, EventKind::Impact);
        assert_eq!(at.step, 10);
    }

    #[test]
    fn event_log_collects_in_order() {
        let mut log = EventLog::standard();
        let samples = [
            make_sample(0, 0.0, 1.0),
            make_sample(1, 0.01, 0.5),
            make_sample(2, 0.015, -0.5),
            make_sample(3, 0.01, -1.0),
            make_sample(4, -0.001, -1.5),
        ];
        for s in &samples {
            log.accept(s);
        }
        let kinds: Vec<EventKind> = log.events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds, vec![EventKind::Apex, EventKind::Impact]);
        assert_eq!(log.first(&EventKind::Apex).unwrap().sample.step, 1);
    }
}

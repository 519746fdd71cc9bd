use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::GestureConfig;
use crate::window::TouchPhase;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {TouchPoint{x, y}}

    fn distance(&self, other: &TouchPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A completed press, fast drag and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    pub start: TouchPoint,
    pub end: TouchPoint,
    /// Pixels per second, measured at release.
    pub velocity: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap,
    Fling(Fling),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOutcome {
    /// A consumed gesture must not fall through to default touch handling.
    pub consumed: bool,
    pub state: Option<bool>,
}

/// Decides whether a fling is a flashlight swipe.
///
/// Both the vertical travel and the vertical velocity have to strictly exceed their
/// thresholds. Up turns the light on, down turns it off.
pub fn evaluate_fling(fling: &Fling, config: &GestureConfig) -> GestureOutcome {
    let delta_y = fling.end.y - fling.start.y;
    if delta_y.abs() > config.swipe_distance && fling.velocity.1.abs() > config.swipe_velocity {
        GestureOutcome{consumed: true, state: Some(delta_y < 0.0)}
    } else {
        GestureOutcome{consumed: false, state: None}
    }
}

#[derive(Debug)]
struct Tracking {
    id: u64,
    down: TouchPoint,
    samples: VecDeque<(TouchPoint, Instant)>,
    left_slop: bool,
}

/// Extracts taps and flings from a raw touch stream.
///
/// Only the first pointer down is followed; other pointers are ignored until it lifts.
#[derive(Debug)]
pub struct FlingDetector {
    config: GestureConfig,
    tracking: Option<Tracking>,
}

impl FlingDetector {
    pub fn new(config: GestureConfig) -> Self {
        FlingDetector{config, tracking: None}
    }

    pub fn config(&self) -> &GestureConfig {&self.config}

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, point: TouchPoint, at: Instant) -> Option<Gesture> {
        match phase {
            TouchPhase::Started => {
                if self.tracking.is_none() {
                    self.tracking = Some(Tracking{id, down: point, samples: VecDeque::from([(point, at)]), left_slop: false});
                }
                None
            },
            TouchPhase::Moved => {
                let slop = self.config.touch_slop;
                let window = self.window();
                if let Some(tracking) = self.tracking.as_mut().filter(|t| t.id == id) {
                    tracking.samples.push_back((point, at));
                    prune(&mut tracking.samples, at, window);
                    tracking.left_slop |= tracking.down.distance(&point) > slop;
                }
                None
            },
            TouchPhase::Ended => {
                let mut tracking = self.tracking.take_if(|t| t.id == id)?;
                tracking.samples.push_back((point, at));
                tracking.left_slop |= tracking.down.distance(&point) > self.config.touch_slop;
                if !tracking.left_slop {
                    return Some(Gesture::Tap);
                }
                let velocity = self.velocity(&mut tracking.samples, point, at);
                let min = self.config.min_fling_velocity;
                (velocity.0.abs() > min || velocity.1.abs() > min).then_some(Gesture::Fling(Fling{
                    start: tracking.down,
                    end: point,
                    velocity,
                }))
            },
            TouchPhase::Cancelled => {
                self.tracking.take_if(|t| t.id == id);
                None
            },
        }
    }

    fn window(&self) -> Duration {
        Duration::from_millis(self.config.velocity_window_ms)
    }

    /// Average velocity over the samples inside the trailing window.
    fn velocity(&self, samples: &mut VecDeque<(TouchPoint, Instant)>, end: TouchPoint, at: Instant) -> (f64, f64) {
        prune(samples, at, self.window());
        let Some((first, t)) = samples.front() else {return (0.0, 0.0)};
        let dt = at.saturating_duration_since(*t).as_secs_f64();
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((end.x - first.x) / dt, (end.y - first.y) / dt)
    }
}

/// Drops samples that fell out of the trailing velocity window.
fn prune(samples: &mut VecDeque<(TouchPoint, Instant)>, at: Instant, window: Duration) {
    while samples.front().is_some_and(|(_, t)| at.saturating_duration_since(*t) > window) {
        samples.pop_front();
    }
}

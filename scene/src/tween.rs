//! Time-driven interpolation with cancellation.
//!
//! A `Tween` is a pure description: start and end values, start time,
//! duration and easing. Sampling it never mutates anything. `TweenSlot` owns at
//! most one running tween per animated value; starting a new one replaces the
//! old one outright (last writer wins) and hands back a fresh `TweenId` the
//! caller can use to cancel it later without clobbering a successor.
//!
//! Times are milliseconds on whatever monotonic clock the host ticks with.

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use crate::model::Point3D;

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    /// `self` at `t = 0`, `to` at `t = 1`.
    #[must_use]
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point3D {
    fn lerp(self, to: Self, t: f64) -> Self {
        Point3D {
            x: self.x.lerp(to.x, t),
            y: self.y.lerp(to.y, t),
            z: self.z.lerp(to.z, t),
        }
    }
}

/// Easing curves. Input and output are both clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Decelerates into the target.
    #[default]
    EaseOutQuad,
    /// Accelerates, then decelerates.
    EaseInOutQuad,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Cancel token for a started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

/// One sample of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample<T> {
    pub value: T,
    /// The tween has reached `to`.
    pub done: bool,
}

/// Interpolation from `from` to `to` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    id: TweenId,
    from: T,
    to: T,
    started_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    #[must_use]
    pub fn id(&self) -> TweenId {
        self.id
    }

    #[must_use]
    pub fn origin(&self) -> T {
        self.from
    }

    #[must_use]
    pub fn target(&self) -> T {
        self.to
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Eased value at `now_ms`. A zero or negative duration jumps to `to`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> TweenSample<T> {
        if self.duration_ms <= 0.0 {
            return TweenSample { value: self.to, done: true };
        }
        let progress = (now_ms - self.started_ms) / self.duration_ms;
        if progress >= 1.0 {
            return TweenSample { value: self.to, done: true };
        }
        TweenSample { value: self.from.lerp(self.to, self.easing.apply(progress)), done: false }
    }
}

/// Holder for the single running tween of one animated value.
#[derive(Debug, Clone)]
pub struct TweenSlot<T> {
    active: Option<Tween<T>>,
    next_id: u64,
}

impl<T> Default for TweenSlot<T> {
    fn default() -> Self {
        Self { active: None, next_id: 0 }
    }
}

impl<T: Lerp> TweenSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, replacing whatever was running.
    pub fn start(&mut self, from: T, to: T, now_ms: f64, duration_ms: f64, easing: Easing) -> TweenId {
        self.next_id += 1;
        let id = TweenId(self.next_id);
        self.active = Some(Tween { id, from, to, started_ms: now_ms, duration_ms, easing });
        id
    }

    /// Stop the running tween, whichever it is.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Stop the running tween only if it is still `id`.
    pub fn cancel_if(&mut self, id: TweenId) -> bool {
        if self.active.as_ref().is_some_and(|t| t.id == id) {
            self.active = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn active(&self) -> Option<&Tween<T>> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Advance to `now_ms`. Returns the current value while a tween is
    /// running; a finished tween yields its end value once and is dropped.
    pub fn tick(&mut self, now_ms: f64) -> Option<T> {
        let sample = self.active.as_ref()?.sample(now_ms);
        if sample.done {
            self.active = None;
        }
        Some(sample.value)
    }
}

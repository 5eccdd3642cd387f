//! Bounded, time-indexed velocity history used to read `v(t - tau)`.

use std::collections::VecDeque;

/// Default maximum number of retained samples.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Time-ordered velocity samples covering at least the configured lag.
///
/// Samples older than the one bracketing `newest - lag` are evicted on every
/// push, and the buffer never holds more than `capacity` samples. When the
/// capacity is too small for the lag at the current sample rate the oldest
/// still-needed samples are dropped, a warning is logged and
/// [`covers_lag`](Self::covers_lag) reports `false` until the window catches
/// up again.
///
/// ```
/// use slipstick_models::delay::VelocityDelayLine;
///
/// let mut line = VelocityDelayLine::new(0.1);
/// line.push(0.0, 1.0);
/// line.push(0.1, 2.0);
/// line.push(0.2, 3.0);
///
/// // value 0.1 s before t = 0.25
/// assert!((line.delayed(0.25).unwrap() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct VelocityDelayLine {
    lag: f64,
    capacity: usize,
    samples: VecDeque<(f64, f64)>,
    truncated: bool,
}

impl VelocityDelayLine {
    /// New delay line with the given lag (s).
    pub fn new(lag: f64) -> Self {
        Self::with_capacity(lag, DEFAULT_CAPACITY)
    }

    /// New delay line holding at most `capacity` samples.
    pub fn with_capacity(lag: f64, capacity: usize) -> Self {
        Self {
            lag: lag.max(0.0),
            capacity: capacity.max(2),
            samples: VecDeque::with_capacity(capacity.clamp(2, 1024)),
            truncated: false,
        }
    }

    /// Configured lag (s).
    pub const fn lag(&self) -> f64 {
        self.lag
    }

    /// Change the lag. Retained history is kept; eviction adapts on the next
    /// push.
    pub fn set_lag(&mut self, lag: f64) {
        self.lag = lag.max(0.0);
    }

    /// Maximum number of retained samples.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.truncated = false;
    }

    /// Whether the retained window still reaches back `lag` seconds.
    ///
    /// `false` only after the capacity forced out a sample a delayed read
    /// still needed. A short history right after start-up is not a gap.
    pub const fn covers_lag(&self) -> bool {
        !self.truncated
    }

    /// Newest `(time, velocity)` sample.
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.samples.back().copied()
    }

    /// Oldest retained `(time, velocity)` sample.
    pub fn oldest(&self) -> Option<(f64, f64)> {
        self.samples.front().copied()
    }

    /// Time span covered by the retained samples.
    pub fn span(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(old), Some(new)) => new.0 - old.0,
            _ => 0.0,
        }
    }

    /// Append a sample.
    ///
    /// Returns `false` and drops the sample when `time` is earlier than the
    /// newest retained sample.
    #[allow(clippy::float_cmp)]
    pub fn push(&mut self, time: f64, velocity: f64) -> bool {
        if let Some(&(newest, _)) = self.samples.back() {
            if time < newest {
                return false;
            }
            if time == newest {
                self.samples.pop_back();
            }
        }

        let horizon = time - self.lag;
        if self.samples.len() >= self.capacity {
            // the front is still needed unless the next sample already sits
            // at or before the horizon
            let needed = self.samples.get(1).is_none_or(|&(t, _)| t > horizon);
            if needed && !self.truncated {
                tracing::warn!(
                    lag = self.lag,
                    capacity = self.capacity,
                    span = self.span(),
                    "velocity history capacity too small for the lag; delayed reads hold the oldest sample"
                );
            }
            self.truncated |= needed;
            self.samples.pop_front();
        }
        self.samples.push_back((time, velocity));
        self.evict(horizon);
        if self.samples.front().is_some_and(|&(t, _)| t <= horizon) {
            self.truncated = false;
        }
        true
    }

    /// Velocity at `now - lag`.
    ///
    /// Linearly interpolates between bracketing samples and holds the oldest
    /// value before the retained window. `None` when empty.
    pub fn delayed(&self, now: f64) -> Option<f64> {
        if self.lag == 0.0 {
            return self.latest().map(|(_, v)| v);
        }
        self.sample_at(now - self.lag)
    }

    /// Velocity `lag` seconds before `time`, read as if `(time, velocity)`
    /// had been pushed first. The line itself is left unchanged.
    ///
    /// Lets a caller evaluate with a tentative sample and commit it with
    /// [`push`](Self::push) only once the evaluation succeeds.
    #[allow(clippy::float_cmp)]
    pub fn peek(&self, time: f64, velocity: f64, lag: f64) -> f64 {
        let lag = lag.max(0.0);
        let Some(&(newest_t, newest_v)) = self.samples.back() else {
            return velocity;
        };

        // an out-of-order sample would be dropped by `push`
        if time < newest_t {
            if lag == 0.0 {
                return newest_v;
            }
            return self.sample_at(time - lag).unwrap_or(newest_v);
        }
        if lag == 0.0 {
            return velocity;
        }

        // a repeated timestamp replaces the newest sample
        let base = if time == newest_t {
            self.samples.len() - 1
        } else {
            self.samples.len()
        };
        let Some(&(prev_t, prev_v)) = base.checked_sub(1).and_then(|i| self.samples.get(i)) else {
            return velocity;
        };

        let target = time - lag;
        if target >= prev_t {
            let alpha = (target - prev_t) / (time - prev_t);
            return (velocity - prev_v).mul_add(alpha, prev_v);
        }
        self.sample_at(target).unwrap_or(velocity)
    }

    /// Velocity at an arbitrary `time` inside or before the window.
    pub fn sample_at(&self, time: f64) -> Option<f64> {
        let &(oldest_t, oldest_v) = self.samples.front()?;
        let &(newest_t, newest_v) = self.samples.back()?;
        if time <= oldest_t {
            return Some(oldest_v);
        }
        if time >= newest_t {
            return Some(newest_v);
        }

        // first index with timestamp >= time
        let hi = self.samples.partition_point(|&(t, _)| t < time);
        let (t1, v1) = self.samples[hi];
        let (t0, v0) = self.samples[hi - 1];
        let span = t1 - t0;
        if span <= 0.0 {
            return Some(v1);
        }
        let alpha = (time - t0) / span;
        Some((v1 - v0).mul_add(alpha, v0))
    }

    /// Remove samples no future query can reach, keeping the one at or
    /// before `horizon` for interpolation.
    fn evict(&mut self, horizon: f64) {
        while self.samples.len() > 1 && self.samples[1].0 <= horizon {
            self.samples.pop_front();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Dynamic friction: stiction/sliding state machine with rising static
//! friction.
//!
//! # Physics
//!
//! Stuck regime, spring-like pre-sliding:
//!
//! ```text
//! F = sigma_0 · z
//! ```
//!
//! Sliding regime:
//!
//! ```text
//! F = [F_C + F_S / (1 + (v(t - tau_k) / v_s)²)]·sign(v) + mu_v·v
//! ```
//!
//! `F_S` is the Stribeck magnitude latched at breakaway:
//!
//! ```text
//! F_S = F_S,a + (F_S,inf - F_S,a) · t_d / (t_d + gamma)
//! ```
//!
//! with `F_S,a` the magnitude latched at the previous breakaway,
//! `F_S,inf = (mu_s - mu_c)·f_n` the magnitude after a long rest and `t_d`
//! the dwell time of the stuck period that just ended.
//!
//! # Regime transitions
//!
//! Evaluated once per call, before the force:
//! - Stuck → Sliding when `|v| > DV`. `F_S` is computed and latched.
//! - Sliding → Stuck when `|v| < DV`. The dwell clock restarts.
//! - `|v| == DV` keeps the current regime.

use serde::{Deserialize, Serialize};

use crate::delay::VelocityDelayLine;
use crate::error::FrictionError;
use crate::model::{
    FrictionModel, finite_force, finite_input, require_stribeck_velocity, screen_parameters,
};
use crate::types::{InputData, Parameters};

// ---------------------------------------------------------------------------
// Stribeck growth law
// ---------------------------------------------------------------------------

/// Stribeck magnitude after `dwell` seconds at rest.
///
/// Moves from `anchor` towards `long_term` as `dwell / (dwell + gamma)`.
/// Negative dwell is treated as zero; `dwell + gamma == 0` counts as fully
/// grown.
pub fn stribeck_magnitude(anchor: f64, long_term: f64, dwell: f64, gamma: f64) -> f64 {
    let dwell = dwell.max(0.0);
    let denom = dwell + gamma;
    let growth = if dwell.is_infinite() || denom <= 0.0 {
        1.0
    } else {
        dwell / denom
    };
    (long_term - anchor).mul_add(growth, anchor)
}

// ---------------------------------------------------------------------------
// Regime state
// ---------------------------------------------------------------------------

/// Contact regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Pre-sliding, spring-like.
    #[default]
    Stuck,
    /// Gross sliding.
    Sliding,
}

/// Transition history of a [`DynamicFriction`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeState {
    /// Current regime.
    pub regime: Regime,
    /// Time the current (or last) stuck period began. Latched on the first
    /// sample.
    pub stuck_since: Option<f64>,
    /// Stribeck magnitude latched at the most recent breakaway.
    pub anchor: f64,
    /// Dwell time that produced `anchor`.
    pub breakaway_dwell: f64,
    /// Number of Stuck → Sliding transitions so far.
    pub breakaways: u64,
    /// Time of the last evaluated sample.
    pub last_time: Option<f64>,
    /// Still in the stuck period that was active before the first sample.
    pub initial_period: bool,
}

impl RegimeState {
    /// State of a freshly built model.
    pub const fn initial() -> Self {
        Self {
            regime: Regime::Stuck,
            stuck_since: None,
            anchor: 0.0,
            breakaway_dwell: 0.0,
            breakaways: 0,
            last_time: None,
            initial_period: true,
        }
    }
}

impl Default for RegimeState {
    fn default() -> Self {
        Self::initial()
    }
}

// ---------------------------------------------------------------------------
// DynamicFriction
// ---------------------------------------------------------------------------

/// Stateful stiction/dwell-time friction model.
///
/// Owns its regime history and velocity delay line; one instance per
/// contact, evaluated sequentially. The delay line retains history for the
/// stored `velocity_lag`; explicit parameters passed to
/// [`FrictionModel::compute_friction_force`] only change how it is read.
#[derive(Clone, Debug)]
pub struct DynamicFriction {
    params: Parameters,
    state: RegimeState,
    delay: VelocityDelayLine,
}

impl DynamicFriction {
    pub const NAME: &'static str = "dynamic";

    /// New dynamic model, stuck, with no history.
    ///
    /// Rejects a non-positive Stribeck velocity; other issues are logged.
    pub fn new(params: Parameters) -> Result<Self, FrictionError> {
        screen_parameters(Self::NAME, &params, true)?;
        Ok(Self {
            params,
            state: RegimeState::initial(),
            delay: VelocityDelayLine::new(params.velocity_lag),
        })
    }

    /// Current regime.
    pub const fn regime(&self) -> Regime {
        self.state.regime
    }

    /// Snapshot of the transition history.
    pub const fn state(&self) -> &RegimeState {
        &self.state
    }

    /// Velocity history used for the delayed Stribeck term.
    pub const fn delay_line(&self) -> &VelocityDelayLine {
        &self.delay
    }

    /// Dwell time at `now` for the current stuck period, without logging.
    ///
    /// Zero before the first sample has been seen.
    pub fn dwell_time(&self, now: f64) -> f64 {
        let Some(since) = self.state.stuck_since else {
            return 0.0;
        };
        let credit = if self.state.initial_period {
            self.params.dwell_time
        } else {
            0.0
        };
        ((now - since).max(0.0) + credit).max(0.0)
    }

    fn elapsed_dwell(state: &RegimeState, now: f64, params: &Parameters) -> f64 {
        let since = state.stuck_since.unwrap_or(now);
        let mut elapsed = now - since;
        if elapsed < 0.0 {
            tracing::warn!(
                model = Self::NAME,
                now,
                stuck_since = since,
                "sample time precedes the stuck period start; dwell clamped to zero"
            );
            elapsed = 0.0;
        }
        if state.initial_period {
            elapsed += params.dwell_time;
        }
        elapsed.max(0.0)
    }

    /// Advance `state` for one sample.
    fn transition(state: &mut RegimeState, sample: &InputData, params: &Parameters) {
        let now = sample.time;
        state.stuck_since.get_or_insert(now);

        if let Some(last) = state.last_time.filter(|&last| now < last) {
            tracing::warn!(
                model = Self::NAME,
                now,
                last,
                "non-monotonic sample time"
            );
        }

        let speed = sample.velocity.abs();
        let band = params.zero_velocity_band;

        match state.regime {
            Regime::Stuck if speed > band => {
                let dwell = Self::elapsed_dwell(state, now, params);
                let long_term = params.stribeck_long_term(sample.normal_force);
                let magnitude = stribeck_magnitude(state.anchor, long_term, dwell, params.gamma);
                tracing::debug!(
                    model = Self::NAME,
                    time = now,
                    dwell,
                    magnitude,
                    "breakaway"
                );
                state.anchor = magnitude;
                state.breakaway_dwell = dwell;
                state.breakaways += 1;
                state.regime = Regime::Sliding;
            }
            Regime::Sliding if speed < band => {
                tracing::debug!(model = Self::NAME, time = now, "stick");
                state.stuck_since = Some(now);
                state.initial_period = false;
                state.regime = Regime::Stuck;
            }
            _ => {}
        }

        state.last_time = Some(state.last_time.map_or(now, |last| last.max(now)));
    }

    /// Sliding law with the latched Stribeck magnitude.
    fn sliding_force(
        anchor: f64,
        velocity: f64,
        delayed_velocity: f64,
        normal_force: f64,
        params: &Parameters,
        v_s: f64,
    ) -> f64 {
        let ratio = delayed_velocity / v_s;
        let stribeck = anchor / ratio.mul_add(ratio, 1.0);
        (params.coulomb_force(normal_force) + stribeck)
            .mul_add(velocity.signum(), params.mu_viscous * velocity)
    }
}

impl FrictionModel for DynamicFriction {
    fn compute_friction_force(
        &mut self,
        sample: &InputData,
        params: &Parameters,
    ) -> Result<f64, FrictionError> {
        let v_s = require_stribeck_velocity(params)?;
        finite_input(Self::NAME, sample)?;

        let mut next = self.state;
        Self::transition(&mut next, sample, params);

        let force = match next.regime {
            Regime::Stuck => params.stiffness * sample.displacement,
            Regime::Sliding => {
                let delayed = self.delay.peek(sample.time, sample.velocity, params.velocity_lag);
                Self::sliding_force(
                    next.anchor,
                    sample.velocity,
                    delayed,
                    sample.normal_force,
                    params,
                    v_s,
                )
            }
        };

        // regime state and velocity history advance together, and only on
        // success
        let force = finite_force(Self::NAME, force)?;
        if !self.delay.push(sample.time, sample.velocity) {
            tracing::warn!(
                model = Self::NAME,
                time = sample.time,
                "out-of-order sample dropped from velocity history"
            );
        }
        self.state = next;
        Ok(force)
    }

    fn num_parameters(&self) -> usize {
        9
    }

    fn parameters(&self) -> Parameters {
        self.params
    }

    fn set_parameters(&mut self, params: Parameters) -> Result<(), FrictionError> {
        screen_parameters(Self::NAME, &params, true)?;
        self.params = params;
        self.delay.set_lag(params.velocity_lag);
        Ok(())
    }

    fn reset(&mut self) {
        self.state = RegimeState::initial();
        self.delay.clear();
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Sample stream generators.
//!
//! Every generator produces samples with strictly increasing time, a fixed
//! normal force and a displacement integrated from the velocity.

use rand::Rng;
use slipstick_models::types::InputData;

use crate::rng::seeded_rng;

/// Time base and normal load shared by a generated stream.
#[derive(Clone, Copy, Debug)]
pub struct SampleProfile {
    /// Sample period (s).
    pub dt: f64,
    /// Number of samples.
    pub steps: usize,
    /// Normal contact force.
    pub normal_force: f64,
}

impl Default for SampleProfile {
    fn default() -> Self {
        Self {
            dt: 0.001,
            steps: 1000,
            normal_force: 20.0,
        }
    }
}

impl SampleProfile {
    /// New profile.
    pub const fn new(dt: f64, steps: usize, normal_force: f64) -> Self {
        Self {
            dt,
            steps,
            normal_force,
        }
    }

    /// Samples for an arbitrary velocity function of time.
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(&self, mut velocity: impl FnMut(f64) -> f64) -> Vec<InputData> {
        let mut position = 0.0;
        (0..self.steps)
            .map(|i| {
                let t = i as f64 * self.dt;
                let v = velocity(t);
                let sample = InputData::at(t)
                    .with_velocity(v)
                    .with_normal_force(self.normal_force)
                    .with_positions(0.0, position);
                position += v * self.dt;
                InputData {
                    displacement_rate: v,
                    displacement_gradient: 1.0,
                    ..sample
                }
            })
            .collect()
    }
}

/// Constant velocity for the whole stream.
pub fn constant_velocity(profile: SampleProfile, velocity: f64) -> Vec<InputData> {
    profile.generate(|_| velocity)
}

/// Alternating rest and motion: `rest` seconds at zero velocity, then
/// `slide` seconds at `velocity`, repeated.
pub fn stick_slip_cycle(
    profile: SampleProfile,
    rest: f64,
    slide: f64,
    velocity: f64,
) -> Vec<InputData> {
    let period = rest + slide;
    profile.generate(|t| if t % period < rest { 0.0 } else { velocity })
}

/// Uniform random velocities in `[-amplitude, amplitude)`.
pub fn noisy_velocity(profile: SampleProfile, amplitude: f64, seed: u64) -> Vec<InputData> {
    let mut rng = seeded_rng(seed);
    profile.generate(|_| rng.gen_range(-amplitude..amplitude))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared test fixtures and utilities for slipstick crates.
//!
//! Provides deterministic RNG setup and generators for the sample streams
//! friction models are exercised with.

pub mod profiles;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use profiles::{SampleProfile, constant_velocity, noisy_velocity, stick_slip_cycle};
pub use rng::{jittered_times, seeded_rng, uniform_vec};

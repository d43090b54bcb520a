//! Numerical constants and evolution defaults.

/// Absolute tolerance on displacement DOFs below which the interface is
/// considered stationary.
///
/// Not scaled by mesh size or time step.
pub const DEFAULT_STATIONARY_TOLERANCE: f64 = 1.0e-15;

/// Default fixed time increment.
pub const DEFAULT_TIME_STEP: f64 = 1.0e-3;

/// Default end time of an evolution.
pub const DEFAULT_END_TIME: f64 = 1.0;

/// Cells whose measure (length or area) falls to or below this value are
/// treated as degenerate.
pub const DEGENERATE_MEASURE_THRESHOLD: f64 = 1.0e-14;

/// Polynomial order of the Lagrange spaces for curvature and displacement.
pub const POLYNOMIAL_ORDER: usize = 1;

/// The loop runs while `time <= end_time + END_TIME_SLACK * dt`, so that
/// round-off in the accumulated time never drops the last step.
pub const END_TIME_SLACK: f64 = 0.1;

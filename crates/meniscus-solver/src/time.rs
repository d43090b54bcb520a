//! Fixed-increment time provider.

use meniscus_types::{MeniscusError, MeniscusResult};

/// Time `t_n = t_0 + n·Δt` with a constant increment.
///
/// Times are computed from the step index rather than accumulated, so
/// long runs do not drift.
#[derive(Debug, Clone)]
pub struct FixedStepTimeProvider {
    start_time: f64,
    time_step: f64,
    step: u64,
}

impl FixedStepTimeProvider {
    pub fn new(start_time: f64, time_step: f64) -> MeniscusResult<Self> {
        if !(time_step > 0.0 && time_step.is_finite()) {
            return Err(MeniscusError::InvalidConfig(format!(
                "time step must be positive and finite, got {time_step}"
            )));
        }
        Ok(Self {
            start_time,
            time_step,
            step: 0,
        })
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.start_time + self.step as f64 * self.time_step
    }

    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Advances by one increment.
    pub fn next(&mut self) {
        self.step += 1;
    }
}

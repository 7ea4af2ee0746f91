//! Simulation time settings applied in one call.

/// Start, step, stop and log-sample settings for a simulation run.
///
/// Applied with [`Hopsan::apply_settings`](crate::Hopsan::apply_settings).
/// Values are forwarded as given; the engine decides what is valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationSettings {
    /// Simulation start time, in seconds.
    pub start_time: f64,
    /// Solver time step, in seconds.
    pub time_step: f64,
    /// Simulation stop time, in seconds.
    pub stop_time: f64,
    /// Number of samples logged per result vector.
    pub log_samples: i32,
}

impl SimulationSettings {
    /// Settings spanning `start_time..stop_time` with the default step and
    /// sample count.
    pub fn span(start_time: f64, stop_time: f64) -> Self {
        Self {
            start_time,
            stop_time,
            ..Self::default()
        }
    }

    /// Replace the time step.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Replace the log sample count.
    pub fn with_log_samples(mut self, log_samples: i32) -> Self {
        self.log_samples = log_samples;
        self
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            time_step: 0.001,
            stop_time: 10.0,
            log_samples: 2048,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_keeps_default_step_and_samples() {
        let s = SimulationSettings::span(1.0, 3.0);
        assert_eq!(s.start_time, 1.0);
        assert_eq!(s.stop_time, 3.0);
        assert_eq!(s.time_step, SimulationSettings::default().time_step);
        assert_eq!(s.log_samples, SimulationSettings::default().log_samples);
    }

    #[test]
    fn builders_replace_fields() {
        let s = SimulationSettings::default()
            .with_time_step(1e-4)
            .with_log_samples(500);
        assert_eq!(s.time_step, 1e-4);
        assert_eq!(s.log_samples, 500);
        assert_eq!(s.stop_time, 10.0);
    }
}

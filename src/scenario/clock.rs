/// Snapshot of the external engine's clock after one completed
/// integration step.
///
/// The engine owns the clock; this type only carries the current time
/// and fixed step size into the per-step hook for comparison against
/// event thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepClock {
    time: f64,
    dt: f64,
}

impl StepClock {
    /// Creates a clock snapshot at `time` with step size `dt`.
    #[must_use]
    pub fn new(time: f64, dt: f64) -> Self {
        Self { time, dt }
    }

    /// Current simulated time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Fixed step size.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Whether the upcoming step interval crosses `instant`:
    /// `time < instant <= time + dt`.
    ///
    /// Robust to any fixed step size provided the hook is invoked for
    /// every step; if the engine skips steps, a crossing that falls
    /// entirely inside the skipped interval is missed. That is a known
    /// boundary condition of the contract, not something this test can
    /// recover from.
    #[must_use]
    pub fn straddles(&self, instant: f64) -> bool {
        self.time < instant && instant <= self.time + self.dt
    }

    /// The snapshot one step later.
    #[must_use]
    pub fn advanced(&self) -> Self {
        Self {
            time: self.time + self.dt,
            dt: self.dt,
        }
    }
}

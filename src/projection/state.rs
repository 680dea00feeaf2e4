//! Smoothing state carried from one period to the next

/// State of the smoothing recurrence at a point in the run
#[derive(Debug, Clone)]
pub struct SmoothingState {
    /// Current period (1-indexed; 0 before the first step)
    pub period: u32,

    /// Rate fed into the next step's recurrence
    pub previous_rate: f64,
}

impl SmoothingState {
    /// Initialize state from the starting rate r₀
    pub fn from_starting_rate(starting_rate: f64) -> Self {
        Self {
            period: 0,
            previous_rate: starting_rate,
        }
    }

    /// Advance to the next period
    pub fn advance_period(&mut self) {
        self.period += 1;
    }

    /// Carry `feedback` into the next step's recurrence
    pub fn record(&mut self, feedback: f64) {
        self.previous_rate = feedback;
    }
}

use super::SignalFilter;

/// Exponential smoothing filter.
///
/// Unlike a pass-through-first EMA, the state starts at a fixed initial value
/// and every sample is blended into it, so the very first detection already
/// moves the signal by only `alpha` of the way.
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    alpha: f32,
    initial: f32,
    state: f32,
}

impl ExponentialFilter {
    /// Create a filter whose state starts at zero
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        Self::with_initial(alpha, 0.0)
    }

    /// Create a filter whose state starts (and resets) at `initial`
    #[must_use]
    pub fn with_initial(alpha: f32, initial: f32) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            initial,
            state: initial,
        }
    }
}

impl SignalFilter for ExponentialFilter {
    fn apply(&mut self, sample: f32) -> f32 {
        self.state = self.state * (1.0 - self.alpha) + sample * self.alpha;
        self.state
    }

    fn value(&self) -> f32 {
        self.state
    }

    fn reset(&mut self) {
        self.state = self.initial;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

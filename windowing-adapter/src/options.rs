/// Tuning for [`crate::ScrollCoordinator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoordinatorOptions {
    /// Base overscan, used while idle and as the lower bound while scrolling.
    pub overscan: usize,
    /// Minimum time between two applied samples (one frame at 60 Hz by default).
    pub debounce_ms: u64,
    /// Inactivity after which scrolling is considered finished.
    pub idle_delay_ms: u64,
    /// Velocity (units per ms) at which the overscan doubles. Slower scrolling keeps the
    /// overscan close to its base value.
    pub velocity_threshold: f64,
    /// Upper bound for the widened overscan.
    pub max_overscan: usize,
    /// Samples closer than this to the applied offset are ignored.
    pub noise_floor: f64,
    pub initial_viewport_size: f64,
}

impl CoordinatorOptions {
    pub fn new() -> Self {
        Self {
            overscan: 3,
            debounce_ms: 16,
            idle_delay_ms: 150,
            velocity_threshold: 2.0,
            max_overscan: 100,
            noise_floor: 1.0,
            initial_viewport_size: 0.0,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_idle_delay_ms(mut self, idle_delay_ms: u64) -> Self {
        self.idle_delay_ms = idle_delay_ms;
        self
    }

    pub fn with_velocity_threshold(mut self, velocity_threshold: f64) -> Self {
        self.velocity_threshold = velocity_threshold;
        self
    }

    pub fn with_max_overscan(mut self, max_overscan: usize) -> Self {
        self.max_overscan = max_overscan;
        self
    }

    pub fn with_noise_floor(mut self, noise_floor: f64) -> Self {
        self.noise_floor = noise_floor;
        self
    }

    pub fn with_initial_viewport_size(mut self, viewport_size: f64) -> Self {
        self.initial_viewport_size = viewport_size;
        self
    }
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

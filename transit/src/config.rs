//! Simulation-wide settings.

use std::time::Duration;

/// Pause a car takes before entering a lane right behind another car of the
/// same direction.
pub const DEFAULT_FOLLOW_DELAY: Duration = Duration::from_millis(10);

/// Settings shared by every connector of a simulation.
///
/// Per-connector timings (travel time, maximum wait time, capacity) come from
/// the scenario itself; this only holds what the scenario does not describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitConfig {
    follow_delay: Duration,
}

impl TransitConfig {
    /// Starts building a configuration from the defaults.
    pub fn builder() -> TransitConfigBuilder {
        TransitConfigBuilder::default()
    }

    /// Gap kept between two cars of the same direction on a narrow bridge or
    /// crossroad.
    pub fn follow_delay(&self) -> Duration {
        self.follow_delay
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            follow_delay: DEFAULT_FOLLOW_DELAY,
        }
    }
}

/// A builder for [`TransitConfig`].
///
/// ```
/// use std::time::Duration;
/// use transit::TransitConfig;
///
/// let config = TransitConfig::builder()
///     .follow_delay(Duration::from_millis(5))
///     .build();
/// assert_eq!(config.follow_delay(), Duration::from_millis(5));
/// ```
#[derive(Debug, Default)]
pub struct TransitConfigBuilder {
    follow_delay: Option<Duration>,
}

impl TransitConfigBuilder {
    /// Sets the follow delay.
    pub fn follow_delay(mut self, delay: Duration) -> Self {
        self.follow_delay = Some(delay);
        self
    }

    pub fn build(self) -> TransitConfig {
        TransitConfig {
            follow_delay: self.follow_delay.unwrap_or(DEFAULT_FOLLOW_DELAY),
        }
    }
}

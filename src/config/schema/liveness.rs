use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Self-probe schedule that keeps an idle-suspending host awake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Externally reachable base URL of this service. No URL, no probing.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Grace period before the first probe, so the listener is bound
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,
    /// Delay after a successful probe; keep below the host's idle timeout
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Delay after a failed probe
    #[serde(default = "default_retry_secs")]
    pub retry_secs: u64,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_startup_delay_secs() -> u64 {
    10
}

fn default_interval_secs() -> u64 {
    600
}

fn default_retry_secs() -> u64 {
    60
}

fn default_probe_timeout_secs() -> u64 {
    30
}

impl LivenessConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_secs.max(1))
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            public_url: None,
            startup_delay_secs: default_startup_delay_secs(),
            interval_secs: default_interval_secs(),
            retry_secs: default_retry_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

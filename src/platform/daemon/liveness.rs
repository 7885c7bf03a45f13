//! Self-probe loop that keeps an idle-suspending host from sleeping.
//!
//! Lifecycle: `Idle -> Waiting(startup) -> Probing -> Waiting(interval | retry) -> ...`
//! until the shutdown signal flips to `true`. Probe failures are logged and
//! counted, never escalated.

use crate::config::LivenessConfig;
use crate::llm::build_http_client;
use anyhow::{Context, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

/// One reachability check against the service's own health endpoint.
pub trait HealthProbe: Send + Sync {
    /// Human-readable target for logs.
    fn target(&self) -> &str;

    fn probe(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// `GET {public_url}/health` over reqwest.
pub struct HttpHealthProbe {
    url: Url,
    client: reqwest::Client,
}

impl HttpHealthProbe {
    pub fn new(public_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(public_url.trim()).context("parse liveness public_url")?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("liveness public_url must use http or https, got {}", base.scheme());
        }
        let url = health_url(base).context("build liveness health URL")?;
        Ok(Self {
            url,
            client: build_http_client(timeout.as_secs()),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Append `health` to the base path, keeping any path prefix the host mounts us under.
fn health_url(mut base: Url) -> Result<Url, url::ParseError> {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("health")
}

impl HealthProbe for HttpHealthProbe {
    fn target(&self) -> &str {
        self.url.as_str()
    }

    fn probe(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url.clone())
                .send()
                .await
                .map_err(reqwest::Error::without_url)
                .context("health request failed")?;
            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("health endpoint returned {status}");
            }
            Ok(())
        })
    }
}

/// Delays driving the probe loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSchedule {
    pub startup_delay: Duration,
    pub interval: Duration,
    pub retry_delay: Duration,
}

impl From<&LivenessConfig> for ProbeSchedule {
    fn from(config: &LivenessConfig) -> Self {
        Self {
            startup_delay: config.startup_delay(),
            interval: config.interval(),
            retry_delay: config.retry_delay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    Idle,
    Waiting(Duration),
    Probing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessProbeState {
    pub phase: ProbePhase,
    pub last_attempt_at: Option<Instant>,
    pub next_delay: Duration,
    pub consecutive_failures: u32,
}

impl LivenessProbeState {
    fn new(startup_delay: Duration) -> Self {
        Self {
            phase: ProbePhase::Idle,
            last_attempt_at: None,
            next_delay: startup_delay,
            consecutive_failures: 0,
        }
    }
}

pub struct LivenessKeeper {
    probe: Option<Arc<dyn HealthProbe>>,
    schedule: ProbeSchedule,
    state: LivenessProbeState,
}

impl LivenessKeeper {
    /// A keeper without a probe stays idle until shutdown.
    pub fn new(probe: Option<Arc<dyn HealthProbe>>, schedule: ProbeSchedule) -> Self {
        Self {
            probe,
            schedule,
            state: LivenessProbeState::new(schedule.startup_delay),
        }
    }

    /// A missing or unusable public URL leaves the keeper idle; it never fails startup.
    pub fn from_config(config: &LivenessConfig) -> Self {
        let timeout = Duration::from_secs(config.probe_timeout_secs.max(1));
        let probe = config
            .public_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .and_then(|url| match HttpHealthProbe::new(url, timeout) {
                Ok(probe) => Some(Arc::new(probe) as Arc<dyn HealthProbe>),
                Err(e) => {
                    tracing::warn!("Liveness keeper disabled, unusable public URL {url:?}: {e:#}");
                    None
                }
            });
        Self::new(probe, ProbeSchedule::from(config))
    }

    pub fn state(&self) -> &LivenessProbeState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.probe.is_some()
    }

    /// Run one probe and return the delay before the next one.
    pub async fn tick(&mut self) -> Duration {
        let Some(probe) = self.probe.clone() else {
            self.state.phase = ProbePhase::Idle;
            return self.schedule.interval;
        };

        self.state.phase = ProbePhase::Probing;
        self.state.last_attempt_at = Some(Instant::now());

        let delay = match probe.probe().await {
            Ok(()) => {
                if self.state.consecutive_failures > 0 {
                    tracing::info!(
                        "Liveness probe recovered after {} failure(s)",
                        self.state.consecutive_failures
                    );
                }
                self.state.consecutive_failures = 0;
                tracing::info!(url = probe.target(), "Liveness probe succeeded");
                self.schedule.interval
            }
            Err(e) => {
                self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);
                tracing::warn!(
                    url = probe.target(),
                    consecutive_failures = self.state.consecutive_failures,
                    "Liveness probe failed: {e:#}"
                );
                self.schedule.retry_delay
            }
        };

        self.state.next_delay = delay;
        self.state.phase = ProbePhase::Waiting(delay);
        delay
    }

    /// Drive the probe loop until `shutdown` carries `true` or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        if self.probe.is_none() {
            tracing::info!("Liveness keeper idle: no public URL configured");
            wait_for_shutdown(&mut shutdown).await;
            return;
        }

        let mut delay = self.schedule.startup_delay;
        while !*shutdown.borrow() {
            self.state.phase = ProbePhase::Waiting(delay);
            tokio::select! {
                () = tokio::time::sleep(delay) => {
                    delay = self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.state.phase = ProbePhase::Idle;
        tracing::debug!("Liveness keeper stopped");
    }

    pub fn spawn(self) -> LivenessHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        LivenessHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Owner side of a spawned keeper.
pub struct LivenessHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LivenessHandle {
    /// Signal the keeper and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Liveness keeper task ended abnormally: {e}");
        }
    }
}

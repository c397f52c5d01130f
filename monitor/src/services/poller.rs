//! Recurring refresh timer

use std::time::Duration;

use config::ConfigError;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::refresh::Monitor;
use crate::error::{MonitorError, MonitorResult};
use crate::external::ForecastProvider;

struct Active {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Holds at most one running refresh loop
#[derive(Default)]
pub struct Poller {
    active: Option<Active>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Start refreshing every `period`, replacing any running loop.
    ///
    /// The first refresh fires immediately, or once the replaced loop has
    /// finished its in-flight refresh. A zero period is rejected.
    pub fn start<P>(&mut self, monitor: Monitor<P>, period: Duration) -> MonitorResult<()>
    where
        P: ForecastProvider + 'static,
    {
        if period.is_zero() {
            return Err(MonitorError::Configuration(ConfigError::Message(
                "polling period must be non-zero".into(),
            )));
        }

        let previous = self.signal_stop();

        let (stop, mut stopped) = oneshot::channel();
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::error!(error = %e, "Previous poller loop failed");
                }
            }

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stopped => break,
                    _ = ticker.tick() => monitor.refresh().await,
                }
            }
            tracing::debug!("Poller loop exited");
        });

        tracing::info!(period_secs = period.as_secs_f64(), "Poller started");
        self.active = Some(Active { stop, handle });
        Ok(())
    }

    /// Stop scheduling refreshes.
    ///
    /// A refresh already in flight runs to completion and its result is
    /// still published; no further ticks fire. Returns whether a loop was
    /// running.
    pub fn stop(&mut self) -> bool {
        self.signal_stop().is_some()
    }

    fn signal_stop(&mut self) -> Option<JoinHandle<()>> {
        let active = self.active.take()?;
        // The loop may already be gone; nothing to signal then
        let _ = active.stop.send(());
        tracing::info!("Poller stopped");
        Some(active.handle)
    }

    /// Stop and wait for the loop, including any in-flight refresh
    pub async fn shutdown(&mut self) -> MonitorResult<()> {
        if let Some(active) = self.active.take() {
            let _ = active.stop.send(());
            active.handle.await?;
            tracing::info!("Poller shut down");
        }
        Ok(())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

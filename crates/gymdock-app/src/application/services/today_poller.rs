use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::dtos::TodaySnapshotDto;
use crate::application::queries::AdminQueries;
use gymdock_domain::DomainError;

/// Polls today's check-ins at a fixed interval and publishes each snapshot.
///
/// A failed poll keeps the previous snapshot on the channel.
pub struct TodayPoller {
    queries: Arc<AdminQueries>,
    interval: Duration,
    sender: Arc<watch::Sender<Option<TodaySnapshotDto>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TodayPoller {
    pub fn new(queries: Arc<AdminQueries>, interval: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            queries,
            interval,
            sender: Arc::new(sender),
            handle: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TodaySnapshotDto>> {
        self.sender.subscribe()
    }

    /// Fetch once and publish the result.
    pub async fn poll_once(&self) -> Result<TodaySnapshotDto, DomainError> {
        let snapshot = self.queries.get_today().await?;
        self.sender.send_replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Start the background loop. Returns `false` if it is already running.
    pub async fn start(&self) -> bool {
        let mut handle = self.handle.lock().await;
        if handle.as_ref().is_some_and(|task| !task.is_finished()) {
            return false;
        }

        let queries = self.queries.clone();
        let sender = self.sender.clone();
        let period = self.interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match queries.get_today().await {
                    Ok(snapshot) => {
                        sender.send_replace(Some(snapshot));
                    }
                    Err(e) => {
                        warn!(
                            "[poll] today fetch failed, keeping last snapshot: {}",
                            e.format_with_code()
                        );
                    }
                }
            }
        }));

        info!("[poll] started interval_ms={}", period.as_millis());
        true
    }

    pub async fn stop(&self) {
        if let Some(task) = self.handle.lock().await.take() {
            task.abort();
            info!("[poll] stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TodayPoller {
    fn drop(&mut self) {
        if let Some(task) = self.handle.get_mut().take() {
            task.abort();
        }
    }
}

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::sleep};

use crate::{
    domain::PollCursor,
    infrastructure::{notifier::Notifier, shutdown::ShutdownListener},
    practicum::{parse_status, validate, PollError, StatusSource},
};

use super::gate::NotificationGate;

/// What a single poll cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was handed to the notifier.
    Notified,
    /// The first record produced the same message as last time.
    Unchanged,
    /// The response carried no records.
    NoUpdates,
    /// The cycle failed; an alert was sent and the cursor kept its value.
    Failed,
}

pub struct HomeworkPoller {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    gate: NotificationGate,
    cursor: PollCursor,
    retry_period: Duration,
}

impl HomeworkPoller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
        cursor: PollCursor,
    ) -> Self {
        Self {
            source,
            notifier,
            gate: NotificationGate::new(),
            cursor,
            retry_period,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    pub fn spawn(mut self, mut shutdown: ShutdownListener) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run_loop(&mut shutdown).await;
        })
    }

    async fn run_loop(&mut self, shutdown: &mut ShutdownListener) {
        tracing::info!(
            target: "poller",
            cursor = %self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "homework poller started"
        );
        loop {
            if shutdown.is_triggered() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!(target: "poller", ?outcome, cursor = %self.cursor, "cycle finished");

            tokio::select! {
                _ = sleep(self.retry_period) => {}
                _ = shutdown.notified() => break,
            }
        }
        tracing::info!(
            target: "poller",
            cursor = %self.cursor(),
            last_sent = ?self.gate().last_sent(),
            "homework poller stopped"
        );
    }

    /// Runs one fetch/validate/parse/notify pass. Errors never escape; they become alerts.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("Program failure: {err}");
                tracing::error!(
                    target: "poller",
                    kind = err.kind(),
                    error = %err,
                    cursor = %self.cursor,
                    "poll cycle failed"
                );
                self.notifier.notify(&message).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, PollError> {
        let payload = self.source.fetch(self.cursor).await?;
        let response = validate(payload)?;

        // only the most recent record is considered per cycle
        let outcome = match response.homeworks.first() {
            Some(record) => {
                let message = parse_status(record)?;
                if self.gate.should_send(&message) {
                    self.gate.record(message.as_str());
                    self.notifier.notify(&message).await;
                    CycleOutcome::Notified
                } else {
                    tracing::debug!(target: "poller", "status unchanged since last message");
                    CycleOutcome::Unchanged
                }
            }
            None => CycleOutcome::NoUpdates,
        };

        // Failed cycles return above and leave the cursor where it was.
        self.cursor = PollCursor::after(response.current_date, self.retry_period.as_secs());
        Ok(outcome)
    }
}

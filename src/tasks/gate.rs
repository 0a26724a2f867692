/// Single-slot deduplication: only the last dispatched message is remembered.
///
/// A message equal to the remembered one is suppressed, anything else passes.
/// There is no history, so a status that flips A -> B -> A is sent again.
#[derive(Debug, Default)]
pub struct NotificationGate {
    last_sent: Option<String>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_send(&self, candidate: &str) -> bool {
        self.last_sent.as_deref() != Some(candidate)
    }

    /// Must be called before delivery so a failed send is not retried for the same text.
    pub fn record(&mut self, candidate: impl Into<String>) {
        self.last_sent = Some(candidate.into());
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }
}

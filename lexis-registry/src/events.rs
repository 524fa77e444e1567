//! Event delivery to external observers.
//!
//! The registry holds an [`EventSink`] but never depends on it: events are
//! emitted only after a mutation has committed, and a sink has no way to
//! report failure back.

use std::sync::Mutex;

use lexis_types::RegistryEvent;

/// Receiver of mint and transfer notifications.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RegistryEvent);
}

/// Any thread-safe closure can act as a sink.
impl<F> EventSink for F
where
    F: Fn(&RegistryEvent) + Send + Sync,
{
    fn emit(&self, event: &RegistryEvent) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &RegistryEvent) {}
}

/// Writes each event as a structured `tracing` record at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &RegistryEvent) {
        let attrs = event
            .attributes()
            .iter()
            .map(|a| format!("{}={}", a.key, a.value))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(target: "lexis::events", event = event.ty(), "{}", attrs);
    }
}

/// Keeps every event in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RegistryEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RegistryEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &RegistryEvent) {
        self.lock().push(event.clone());
    }
}

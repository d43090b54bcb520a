//! Pluggable event sinks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::events::EvolutionEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &EvolutionEvent);

    /// Called when the run ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared view of the events collected by a [`VecSink`].
pub type EventStore = Arc<Mutex<Vec<EvolutionEvent>>>;

/// Collects events in memory for testing and inspection.
///
/// The sink is moved into the bus; keep the [`EventStore`] returned by
/// [`VecSink::store`] to read the events afterwards.
pub struct VecSink {
    events: EventStore,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the collected events.
    pub fn store(&self) -> EventStore {
        Arc::clone(&self.events)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &EvolutionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &EvolutionEvent) {
        match self.level {
            tracing::Level::ERROR | tracing::Level::WARN | tracing::Level::INFO => {
                tracing::info!(step = event.step, event = ?event.kind, "evolution_event")
            }
            tracing::Level::DEBUG => {
                tracing::debug!(step = event.step, event = ?event.kind, "evolution_event")
            }
            tracing::Level::TRACE => {
                tracing::trace!(step = event.step, event = ?event.kind, "evolution_event")
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per event and line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    failed: bool,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    /// True if a write has failed; later events are dropped.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &EvolutionEvent) {
        if self.failed {
            return;
        }
        let written = serde_json::to_writer(&mut self.writer, event)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"));
        if let Err(e) = written {
            tracing::warn!("telemetry sink write failed: {e}");
            self.failed = true;
        }
    }

    fn finalize(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("telemetry sink flush failed: {e}");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}

//! In-process queue between the evolution driver and telemetry sinks.
//!
//! `TelemetryObserver` queues events on a `std::sync::mpsc` channel while a
//! step runs and drains them into the sinks once the step's snapshot has
//! been taken, so sink I/O never happens between assembly and solve.

use std::sync::mpsc;

use crate::events::EvolutionEvent;
use crate::sinks::EventSink;

/// Queue of [`EvolutionEvent`]s fanned out to every registered sink.
pub struct EventBus {
    sender: mpsc::Sender<EvolutionEvent>,
    receiver: mpsc::Receiver<EvolutionEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Sinks see events in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// While disabled, `emit` discards events; already queued ones are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit(&self, event: EvolutionEvent) {
        if self.enabled {
            // Sending only fails once the receiver is gone, and the bus owns it.
            let _ = self.sender.send(event);
        }
    }

    /// Hands every queued event, oldest first, to each sink.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// End of run: drains the queue, then lets sinks flush their writers.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

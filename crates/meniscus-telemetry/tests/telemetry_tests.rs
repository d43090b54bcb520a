//! Integration tests for meniscus-telemetry.

use meniscus_telemetry::bus::EventBus;
use meniscus_telemetry::events::{EventKind, EvolutionEvent};
use meniscus_telemetry::sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};

fn begin(step: u64) -> EvolutionEvent {
    EvolutionEvent::new(
        step,
        EventKind::StepBegin {
            time: step as f64 * 1e-3,
            time_step: 1e-3,
        },
    )
}

#[test]
fn emit_and_flush_reaches_sink() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let store = sink.store();
    bus.add_sink(Box::new(sink));

    bus.emit(begin(1));
    bus.emit(EvolutionEvent::new(1, EventKind::StepEnd { wall_time: 0.002 }));
    assert!(store.lock().unwrap().is_empty());

    bus.flush();
    let events = store.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], begin(1));
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let store = sink.store();
    bus.add_sink(Box::new(sink));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(begin(0));
    bus.flush();
    assert!(store.lock().unwrap().is_empty());
}

#[test]
fn disabling_keeps_already_queued_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let store = sink.store();
    bus.add_sink(Box::new(sink));

    bus.emit(begin(1));
    bus.set_enabled(false);
    bus.emit(begin(2));
    bus.finish();

    let events = store.lock().unwrap();
    assert_eq!(events.as_slice(), &[begin(1)]);
}

#[test]
fn multiple_sinks_each_receive_events() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    let (sa, sb) = (a.store(), b.store());
    bus.add_sink(Box::new(a));
    bus.add_sink(Box::new(b));
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    assert_eq!(bus.sink_count(), 3);

    bus.emit(begin(3));
    bus.finish();
    assert_eq!(sa.lock().unwrap().len(), 1);
    assert_eq!(sb.lock().unwrap().len(), 1);
}

#[test]
fn event_serialization_is_tagged() {
    let event = EvolutionEvent::new(
        5,
        EventKind::Stationarity {
            max_displacement: 1e-16,
            tolerance: 1e-15,
            stationary: true,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"stationarity\""));
    let recovered: EvolutionEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn json_lines_sink_writes_one_line_per_event() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.handle(&begin(1));
    sink.handle(&EvolutionEvent::new(
        1,
        EventKind::LinearSolve {
            solver: "faer_sparse_lu".into(),
            dofs: 96,
            rhs_norm: 0.5,
            relative_residual: 1e-14,
        },
    ));
    sink.finalize();
    assert!(!sink.has_failed());

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let second: EvolutionEvent = serde_json::from_str(lines[1]).unwrap();
    assert!(matches!(second.kind, EventKind::LinearSolve { dofs: 96, .. }));
}

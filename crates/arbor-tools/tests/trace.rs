use arbor_core::Blackboard;
use arbor_tools::{attach_sink, emit, TraceEvent, TraceLog, VecTraceSink};

#[test]
fn emit_without_log_or_sink_is_a_no_op() {
    let bb = Blackboard::new();
    emit(&bb, TraceEvent::new(0, "nothing"));
}

#[test]
fn emit_writes_to_trace_log_when_present() {
    let mut bb = Blackboard::new();
    let log = TraceLog::attach(&mut bb);

    emit(&bb, TraceEvent::new(1, "test").with_a(10).with_b(20));

    let log = log.borrow();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 1);
    assert_eq!(log.events[0].tag, "test");
    assert_eq!(log.events[0].a, 10);
    assert_eq!(log.events[0].b, 20);
}

#[test]
fn emit_writes_to_sink_when_present() {
    let mut bb = Blackboard::new();
    let events = VecTraceSink::default();
    let _sink = attach_sink(&mut bb, events.clone());

    emit(&bb, TraceEvent::new(2, "sink_event"));

    let recorded = events.drain();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].tick, 2);
    assert_eq!(recorded[0].tag, "sink_event");
    assert!(events.is_empty());
}

#[test]
fn emit_writes_to_both_log_and_sink_when_both_present() {
    let mut bb = Blackboard::new();
    let log = TraceLog::attach(&mut bb);
    let events = VecTraceSink::default();
    let _sink = attach_sink(&mut bb, events.clone());

    emit(&bb, TraceEvent::new(3, "both"));

    assert_eq!(log.borrow().tagged("both").count(), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events.drain()[0].tag, "both");
}

#[test]
fn dropped_sink_handle_detaches_the_sink() {
    let mut bb = Blackboard::new();
    let events = VecTraceSink::default();
    let sink = attach_sink(&mut bb, events.clone());

    emit(&bb, TraceEvent::new(4, "kept"));
    drop(sink);
    emit(&bb, TraceEvent::new(5, "lost"));

    assert_eq!(events.len(), 1);
}

#[test]
fn dropped_log_stops_recording() {
    let mut bb = Blackboard::new();
    let log = TraceLog::attach(&mut bb);
    drop(log);

    emit(&bb, TraceEvent::new(4, "lost"));
    assert_eq!(bb.len_refs(), 1);
}
